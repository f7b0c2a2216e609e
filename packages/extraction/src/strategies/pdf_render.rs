//! Rendering-engine PDF extraction via pdfium.
//!
//! Only built with the `pdfium` feature, and only usable when a pdfium shared
//! library can be found at runtime. Works on files only; uploads skip it.

use crate::error::{StrategyError, StrategyResult};
use crate::source::PdfDocument;
use crate::traits::PdfStrategy;

/// Extracts text through the pdfium rendering engine.
#[derive(Debug, Default)]
pub struct RenderPdfStrategy;

impl RenderPdfStrategy {
    pub const NAME: &'static str = "render";
}

impl PdfStrategy for RenderPdfStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn accepts(&self, document: &PdfDocument) -> bool {
        document.path().is_some()
    }

    #[cfg(feature = "pdfium")]
    fn extract_pages(&self, document: &PdfDocument) -> StrategyResult<Vec<String>> {
        use pdfium_render::prelude::*;

        let path = document
            .path()
            .ok_or_else(|| StrategyError::Unavailable("pdfium requires a file path".into()))?;

        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| StrategyError::Unavailable(format!("pdfium library not found: {}", e)))?;
        let pdfium = Pdfium::new(bindings);

        let pdf = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| StrategyError::Parse(e.to_string()))?;

        let mut pages = Vec::new();
        for page in pdf.pages().iter() {
            let text = page
                .text()
                .map_err(|e| StrategyError::Parse(e.to_string()))?;
            pages.push(text.all());
        }
        Ok(pages)
    }

    #[cfg(not(feature = "pdfium"))]
    fn extract_pages(&self, _document: &PdfDocument) -> StrategyResult<Vec<String>> {
        Err(StrategyError::Unavailable(
            "built without the `pdfium` feature".into(),
        ))
    }
}
