//! Testing utilities including mock implementations.
//!
//! These let applications exercise the resolver without network access or
//! real PDF files.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{StrategyError, StrategyResult};
use crate::source::PdfDocument;
use crate::traits::{PageFetcher, PdfStrategy, UrlStrategy};

/// A mock page fetcher serving canned HTML.
///
/// Unknown URLs fail with an HTTP error, like a 404 would.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a fetcher with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    /// Fail every fetch of `url` with a network error.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(url.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches made.
    pub fn fetch_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> StrategyResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if self.failing.read().unwrap().contains(url) {
            return Err(StrategyError::Http(format!("connection refused: {}", url)));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| StrategyError::Http(format!("HTTP 404 for {}", url)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Scripted outcome of a mock strategy.
#[derive(Debug, Clone)]
enum Outcome<T> {
    Return(T),
    Fail,
}

/// A mock URL strategy with a fixed outcome.
pub struct MockUrlStrategy {
    name: String,
    outcome: Outcome<String>,
    calls: RwLock<Vec<String>>,
}

impl MockUrlStrategy {
    /// Strategy that returns `text` for every URL.
    pub fn returning(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Return(text.into()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Strategy that fails every URL.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Fail,
            calls: RwLock::new(Vec::new()),
        }
    }

    /// URLs this strategy was asked to extract.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl UrlStrategy for MockUrlStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, url: &str) -> StrategyResult<String> {
        self.calls.write().unwrap().push(url.to_string());
        match &self.outcome {
            Outcome::Return(text) => Ok(text.clone()),
            Outcome::Fail => Err(StrategyError::Parse(format!("{} failed", self.name))),
        }
    }
}

/// A mock PDF strategy with a fixed outcome.
pub struct MockPdfStrategy {
    name: String,
    outcome: Outcome<Vec<String>>,
    path_only: bool,
    calls: RwLock<usize>,
}

impl MockPdfStrategy {
    /// Strategy that returns the given pages for every document.
    pub fn returning<S: Into<String>>(name: impl Into<String>, pages: Vec<S>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Return(pages.into_iter().map(Into::into).collect()),
            path_only: false,
            calls: RwLock::new(0),
        }
    }

    /// Strategy that fails every document.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Fail,
            path_only: false,
            calls: RwLock::new(0),
        }
    }

    /// Only accept documents backed by a file path.
    pub fn path_only(mut self) -> Self {
        self.path_only = true;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

impl PdfStrategy for MockPdfStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, document: &PdfDocument) -> bool {
        !self.path_only || document.path().is_some()
    }

    fn extract_pages(&self, _document: &PdfDocument) -> StrategyResult<Vec<String>> {
        *self.calls.write().unwrap() += 1;
        match &self.outcome {
            Outcome::Return(pages) => Ok(pages.clone()),
            Outcome::Fail => Err(StrategyError::Parse(format!("{} failed", self.name))),
        }
    }
}
