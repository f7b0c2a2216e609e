//! HTTP page fetcher.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{StrategyError, StrategyResult};
use crate::traits::fetcher::PageFetcher;

/// Default download timeout for article pages.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Browser-like User-Agent; many news sites reject obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches pages over HTTP(S) with reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> StrategyResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| StrategyError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create with a custom HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Normalize URL by adding https:// if no scheme is present
    pub fn normalize_url(url: &str) -> String {
        let url = url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> StrategyResult<String> {
        let url = Self::normalize_url(url);
        url::Url::parse(&url).map_err(|e| StrategyError::Http(format!("invalid URL {}: {}", url, e)))?;

        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            StrategyError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::Http(format!("HTTP {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| StrategyError::Http(format!("failed to read response body: {}", e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}
