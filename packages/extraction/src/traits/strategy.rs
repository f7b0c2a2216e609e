//! Extraction strategy traits.
//!
//! A strategy turns one kind of raw document into plain text. Strategies are
//! tried in order by [`TextResolver`](crate::TextResolver); the first one that
//! returns non-blank text wins.

use async_trait::async_trait;

use crate::error::StrategyResult;
use crate::source::PdfDocument;

/// Turns a web page into article text.
#[async_trait]
pub trait UrlStrategy: Send + Sync {
    /// Registry name, also used in logs.
    fn name(&self) -> &str;

    /// Download and extract the page at `url`.
    async fn extract(&self, url: &str) -> StrategyResult<String>;
}

/// Turns a PDF into one text string per page.
///
/// PDF parsing is CPU-bound, so implementations are synchronous and the
/// resolver runs the whole PDF chain on the blocking thread pool.
pub trait PdfStrategy: Send + Sync {
    /// Registry name, also used in logs.
    fn name(&self) -> &str;

    /// Whether this strategy can handle the document at all.
    ///
    /// Rendering-engine strategies only work on files, so they skip uploads.
    fn accepts(&self, document: &PdfDocument) -> bool {
        let _ = document;
        true
    }

    /// Extract the text of every page, in page order.
    fn extract_pages(&self, document: &PdfDocument) -> StrategyResult<Vec<String>>;
}
