//! Core trait abstractions for text resolution.
//!
//! Strategies and fetchers are trait objects so the resolver can hold an
//! ordered, configurable chain of them and tests can swap in mocks.

pub mod fetcher;
pub mod strategy;

pub use fetcher::PageFetcher;
pub use strategy::{PdfStrategy, UrlStrategy};
