//! Generic paragraph scrape.
//!
//! Collects the text of every `<p>` element on the page and joins it with
//! spaces. Crude, but it works on markup the readability scorer cannot make
//! sense of.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

use super::readability::element_text;
use crate::error::{StrategyError, StrategyResult};
use crate::traits::{PageFetcher, UrlStrategy};

/// Joins the text of all paragraph tags.
pub struct ParagraphStrategy {
    fetcher: Arc<dyn PageFetcher>,
}

impl ParagraphStrategy {
    pub const NAME: &'static str = "paragraphs";

    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Join the text of every `<p>` in the document.
    pub fn scrape_paragraphs(html: &str) -> StrategyResult<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("p")
            .map_err(|e| StrategyError::Parse(format!("bad selector: {:?}", e)))?;

        let joined = document
            .select(&selector)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            return Err(StrategyError::Empty);
        }
        Ok(joined)
    }
}

#[async_trait]
impl UrlStrategy for ParagraphStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn extract(&self, url: &str) -> StrategyResult<String> {
        let html = self.fetcher.fetch_html(url).await?;
        Self::scrape_paragraphs(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_all_paragraphs_with_spaces() {
        let html = "<html><body><p> One </p><div><p>Two\n  lines</p></div><p></p><p>Three</p></body></html>";
        assert_eq!(
            ParagraphStrategy::scrape_paragraphs(html).unwrap(),
            "One Two lines Three"
        );
    }

    #[test]
    fn test_no_paragraphs_is_empty() {
        let err = ParagraphStrategy::scrape_paragraphs("<html><body><span>x</span></body></html>")
            .unwrap_err();
        assert!(matches!(err, StrategyError::Empty));
    }
}
