//! Extraction strategy implementations and the name registry.
//!
//! # URL strategies (default order)
//!
//! - `readability` - main-content scoring ([`ReadabilityStrategy`])
//! - `paragraphs` - every `<p>` joined ([`ParagraphStrategy`])
//!
//! # PDF strategies (default order)
//!
//! - `layout` - pdf-extract ([`LayoutPdfStrategy`])
//! - `reader` - lopdf ([`ReaderPdfStrategy`])
//! - `render` - pdfium, file paths only ([`RenderPdfStrategy`])

mod paragraphs;
mod pdf_layout;
mod pdf_reader;
mod pdf_render;
mod readability;

pub use paragraphs::ParagraphStrategy;
pub use pdf_layout::LayoutPdfStrategy;
pub use pdf_reader::ReaderPdfStrategy;
pub use pdf_render::RenderPdfStrategy;
pub use readability::ReadabilityStrategy;

use std::sync::Arc;

use crate::traits::{PageFetcher, PdfStrategy, UrlStrategy};

/// Default URL strategy order.
pub const DEFAULT_URL_STRATEGIES: &[&str] = &[ReadabilityStrategy::NAME, ParagraphStrategy::NAME];

/// Default PDF strategy order.
pub const DEFAULT_PDF_STRATEGIES: &[&str] = &[
    LayoutPdfStrategy::NAME,
    ReaderPdfStrategy::NAME,
    RenderPdfStrategy::NAME,
];

/// Look up a URL strategy by registry name.
pub fn url_strategy(name: &str, fetcher: Arc<dyn PageFetcher>) -> Option<Arc<dyn UrlStrategy>> {
    match name {
        ReadabilityStrategy::NAME => Some(Arc::new(ReadabilityStrategy::new(fetcher))),
        ParagraphStrategy::NAME => Some(Arc::new(ParagraphStrategy::new(fetcher))),
        _ => None,
    }
}

/// Look up a PDF strategy by registry name.
pub fn pdf_strategy(name: &str) -> Option<Arc<dyn PdfStrategy>> {
    match name {
        LayoutPdfStrategy::NAME => Some(Arc::new(LayoutPdfStrategy)),
        ReaderPdfStrategy::NAME => Some(Arc::new(ReaderPdfStrategy)),
        RenderPdfStrategy::NAME => Some(Arc::new(RenderPdfStrategy)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[test]
    fn test_registry_knows_defaults() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(MockFetcher::new());
        for name in DEFAULT_URL_STRATEGIES {
            assert_eq!(url_strategy(name, fetcher.clone()).unwrap().name(), *name);
        }
        for name in DEFAULT_PDF_STRATEGIES {
            assert_eq!(pdf_strategy(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn test_registry_rejects_unknown_names() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(MockFetcher::new());
        assert!(url_strategy("newspaper", fetcher).is_none());
        assert!(pdf_strategy("ocr").is_none());
    }
}
