//! Generic PDF reader fallback via `lopdf`.

use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::source::PdfDocument;
use crate::traits::PdfStrategy;

/// Reads text operators page by page without layout analysis.
///
/// Less faithful than [`LayoutPdfStrategy`](super::LayoutPdfStrategy) but
/// tolerant of documents whose fonts the layout extractor chokes on.
#[derive(Debug, Default)]
pub struct ReaderPdfStrategy;

impl ReaderPdfStrategy {
    pub const NAME: &'static str = "reader";
}

impl PdfStrategy for ReaderPdfStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extract_pages(&self, document: &PdfDocument) -> StrategyResult<Vec<String>> {
        let bytes = document.load_bytes()?;
        let pdf = lopdf::Document::load_mem(&bytes)
            .map_err(|e| StrategyError::Parse(e.to_string()))?;

        let pages = pdf
            .get_pages()
            .into_keys()
            .map(|page_number| {
                pdf.extract_text(&[page_number]).unwrap_or_else(|e| {
                    debug!(page = page_number, error = %e, "Page text extraction failed");
                    String::new()
                })
            })
            .collect();

        Ok(pages)
    }
}
