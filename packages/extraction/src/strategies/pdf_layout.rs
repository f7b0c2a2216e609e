//! Layout-aware PDF text extraction via `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};

use crate::error::{StrategyError, StrategyResult};
use crate::source::PdfDocument;
use crate::traits::PdfStrategy;

/// Positions glyphs on the page before emitting text, which keeps columns and
/// reading order intact on most newspaper-style layouts.
#[derive(Debug, Default)]
pub struct LayoutPdfStrategy;

impl LayoutPdfStrategy {
    pub const NAME: &'static str = "layout";
}

impl PdfStrategy for LayoutPdfStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extract_pages(&self, document: &PdfDocument) -> StrategyResult<Vec<String>> {
        let bytes = document.load_bytes()?;

        // pdf-extract panics on some malformed font tables instead of erroring
        panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }))
        .map_err(|_| StrategyError::Parse("pdf-extract panicked on this document".into()))?
        .map_err(|e| StrategyError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_without_panicking() {
        let doc = PdfDocument::Bytes(b"definitely not a pdf".to_vec());
        assert!(LayoutPdfStrategy.extract_pages(&doc).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let doc = PdfDocument::Path("/nonexistent/article.pdf".into());
        let err = LayoutPdfStrategy.extract_pages(&doc).unwrap_err();
        assert!(matches!(err, StrategyError::Io(_)));
    }
}
