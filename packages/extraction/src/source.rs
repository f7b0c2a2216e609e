//! Input descriptors for text resolution.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where an article's text should come from.
///
/// Exactly one variant is populated per request; the server builds it from the
/// request's `input_type` and payload fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSource {
    /// Article text supplied inline
    Text(String),

    /// Web page to download and extract
    Url(String),

    /// PDF file on the local filesystem
    PdfPath(PathBuf),

    /// PDF content uploaded with the request
    PdfBytes(Vec<u8>),
}

impl ArticleSource {
    /// The strategy family this source is resolved with.
    pub fn kind(&self) -> SourceKind {
        match self {
            ArticleSource::Text(_) => SourceKind::Text,
            ArticleSource::Url(_) => SourceKind::Url,
            ArticleSource::PdfPath(_) | ArticleSource::PdfBytes(_) => SourceKind::Pdf,
        }
    }
}

/// Source type family, used for strategy registration and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Text,
    Url,
    Pdf,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Text => write!(f, "text"),
            SourceKind::Url => write!(f, "url"),
            SourceKind::Pdf => write!(f, "pdf"),
        }
    }
}

/// A PDF handed to the PDF strategies.
#[derive(Debug, Clone)]
pub enum PdfDocument {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PdfDocument {
    /// Filesystem path, when the document came from one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PdfDocument::Path(path) => Some(path),
            PdfDocument::Bytes(_) => None,
        }
    }

    /// Raw bytes of the document, reading the file when necessary.
    pub fn load_bytes(&self) -> std::io::Result<std::borrow::Cow<'_, [u8]>> {
        match self {
            PdfDocument::Path(path) => std::fs::read(path).map(std::borrow::Cow::Owned),
            PdfDocument::Bytes(bytes) => Ok(std::borrow::Cow::Borrowed(bytes)),
        }
    }
}

/// Join per-page text: pages are trimmed, blank pages dropped, the rest joined
/// with newlines.
pub fn merge_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kinds() {
        assert_eq!(ArticleSource::Text("a".into()).kind(), SourceKind::Text);
        assert_eq!(ArticleSource::Url("https://a.b".into()).kind(), SourceKind::Url);
        assert_eq!(ArticleSource::PdfPath("a.pdf".into()).kind(), SourceKind::Pdf);
        assert_eq!(ArticleSource::PdfBytes(vec![1]).kind(), SourceKind::Pdf);
    }

    #[test]
    fn test_merge_pages_drops_blank_pages() {
        let pages = vec!["  First page \n", "", "   \n\t", "Second page"];
        assert_eq!(merge_pages(&pages), "First page\nSecond page");
    }

    #[test]
    fn test_merge_pages_all_blank_is_empty() {
        let pages: Vec<String> = vec![" ".into(), "\n".into()];
        assert!(merge_pages(&pages).is_empty());
    }

    #[test]
    fn test_pdf_document_bytes_are_borrowed() {
        let doc = PdfDocument::Bytes(b"%PDF-1.4".to_vec());
        assert!(doc.path().is_none());
        assert_eq!(&*doc.load_bytes().unwrap(), b"%PDF-1.4");
    }
}
