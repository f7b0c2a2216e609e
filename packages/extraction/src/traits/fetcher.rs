//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::StrategyResult;

/// Downloads a web page's HTML.
///
/// URL strategies share one fetcher; each strategy downloads the page itself
/// so a failure in one never poisons the next.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML body of `url`.
    async fn fetch_html(&self, url: &str) -> StrategyResult<String>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
