//! Article Text Resolution Library
//!
//! Turns raw text, a web page URL, or a PDF into plain article text using an
//! ordered chain of extraction strategies per source type. The first strategy
//! that yields non-blank text wins; failures are logged and the next one is
//! tried.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use extraction::{ArticleSource, HttpFetcher, TextResolver, DEFAULT_FETCH_TIMEOUT};
//!
//! let fetcher = Arc::new(HttpFetcher::new(DEFAULT_FETCH_TIMEOUT)?);
//! let resolver = TextResolver::with_defaults(fetcher);
//!
//! let text = resolver
//!     .resolve(ArticleSource::Url("https://example.com/news/story".into()))
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Fetcher and strategy abstractions
//! - [`strategies`] - Built-in URL and PDF strategies and their registry
//! - [`fetchers`] - HTTP page fetcher
//! - [`resolver`] - The fallback chain driver
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod fetchers;
pub mod resolver;
pub mod source;
pub mod strategies;
pub mod testing;
pub mod traits;

pub use error::{ResolveError, ResolveResult, StrategyError, StrategyFailure, StrategyResult};
pub use fetchers::{HttpFetcher, DEFAULT_FETCH_TIMEOUT};
pub use resolver::{run_pdf_chain, TextResolver};
pub use source::{merge_pages, ArticleSource, PdfDocument, SourceKind};
pub use strategies::{DEFAULT_PDF_STRATEGIES, DEFAULT_URL_STRATEGIES};
pub use traits::{PageFetcher, PdfStrategy, UrlStrategy};
