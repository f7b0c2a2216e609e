//! Page fetcher implementations.
//!
//! - `HttpFetcher` - reqwest-based download with a bounded timeout
//! - `MockFetcher` (in [`crate::testing`]) - canned HTML for tests

mod http;

pub use http::{HttpFetcher, DEFAULT_FETCH_TIMEOUT};

pub use crate::traits::fetcher::PageFetcher;
