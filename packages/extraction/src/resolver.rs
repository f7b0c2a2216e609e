//! Text resolution driver.
//!
//! Holds one ordered strategy chain per source type and walks it until a
//! strategy produces non-blank text. Strategy failures are logged and never
//! reach the caller; only exhaustion of the whole chain does.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ResolveError, ResolveResult, StrategyError, StrategyFailure};
use crate::source::{merge_pages, ArticleSource, PdfDocument, SourceKind};
use crate::strategies::{self, DEFAULT_PDF_STRATEGIES, DEFAULT_URL_STRATEGIES};
use crate::traits::{PageFetcher, PdfStrategy, UrlStrategy};

/// Resolves an [`ArticleSource`] into plain article text.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::{ArticleSource, HttpFetcher, TextResolver};
///
/// let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(10))?);
/// let resolver = TextResolver::with_defaults(fetcher);
/// let text = resolver.resolve(ArticleSource::Url("https://example.com/story".into())).await?;
/// ```
#[derive(Clone)]
pub struct TextResolver {
    url_strategies: Vec<Arc<dyn UrlStrategy>>,
    pdf_strategies: Arc<Vec<Arc<dyn PdfStrategy>>>,
}

impl TextResolver {
    /// Create a resolver from explicit strategy chains.
    pub fn new(
        url_strategies: Vec<Arc<dyn UrlStrategy>>,
        pdf_strategies: Vec<Arc<dyn PdfStrategy>>,
    ) -> Self {
        Self {
            url_strategies,
            pdf_strategies: Arc::new(pdf_strategies),
        }
    }

    /// Create a resolver with the default strategy order.
    pub fn with_defaults(fetcher: Arc<dyn PageFetcher>) -> Self {
        let url_strategies = DEFAULT_URL_STRATEGIES
            .iter()
            .filter_map(|name| strategies::url_strategy(name, fetcher.clone()))
            .collect();
        let pdf_strategies = DEFAULT_PDF_STRATEGIES
            .iter()
            .filter_map(|name| strategies::pdf_strategy(name))
            .collect();
        Self::new(url_strategies, pdf_strategies)
    }

    /// Create a resolver from registry names, in the given order.
    pub fn from_names<U, P>(
        fetcher: Arc<dyn PageFetcher>,
        url_names: &[U],
        pdf_names: &[P],
    ) -> ResolveResult<Self>
    where
        U: AsRef<str>,
        P: AsRef<str>,
    {
        let url_strategies = url_names
            .iter()
            .map(|name| {
                strategies::url_strategy(name.as_ref(), fetcher.clone()).ok_or_else(|| {
                    ResolveError::UnknownStrategy {
                        kind: SourceKind::Url,
                        name: name.as_ref().to_string(),
                    }
                })
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        let pdf_strategies = pdf_names
            .iter()
            .map(|name| {
                strategies::pdf_strategy(name.as_ref()).ok_or_else(|| {
                    ResolveError::UnknownStrategy {
                        kind: SourceKind::Pdf,
                        name: name.as_ref().to_string(),
                    }
                })
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        Ok(Self::new(url_strategies, pdf_strategies))
    }

    /// Names of the URL strategies, in the order they are tried.
    pub fn url_strategy_names(&self) -> Vec<&str> {
        self.url_strategies.iter().map(|s| s.name()).collect()
    }

    /// Names of the PDF strategies, in the order they are tried.
    pub fn pdf_strategy_names(&self) -> Vec<&str> {
        self.pdf_strategies.iter().map(|s| s.name()).collect()
    }

    /// Produce the article text for `source`.
    pub async fn resolve(&self, source: ArticleSource) -> ResolveResult<String> {
        match source {
            ArticleSource::Text(text) => {
                if text.is_empty() {
                    return Err(ResolveError::Input("No text provided.".into()));
                }
                Ok(text)
            }
            ArticleSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(ResolveError::Input("URL is required.".into()));
                }
                self.resolve_url(url.trim()).await
            }
            ArticleSource::PdfPath(path) => {
                if !path.exists() {
                    return Err(ResolveError::Input(format!(
                        "PDF file not found: {}",
                        path.display()
                    )));
                }
                self.resolve_pdf(PdfDocument::Path(path)).await
            }
            ArticleSource::PdfBytes(bytes) => {
                if bytes.is_empty() {
                    return Err(ResolveError::Input(
                        "PDF input requires pdf_path or pdf_base64.".into(),
                    ));
                }
                self.resolve_pdf(PdfDocument::Bytes(bytes)).await
            }
        }
    }

    async fn resolve_url(&self, url: &str) -> ResolveResult<String> {
        let mut attempts = Vec::new();

        for strategy in &self.url_strategies {
            debug!(strategy = strategy.name(), url = %url, "Trying URL strategy");
            let error = match strategy.extract(url).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        strategy = strategy.name(),
                        url = %url,
                        chars = text.len(),
                        "URL text extracted"
                    );
                    return Ok(text.trim().to_string());
                }
                Ok(_) => StrategyError::Empty,
                Err(e) => e,
            };

            warn!(strategy = strategy.name(), url = %url, error = %error, "URL extraction failed");
            attempts.push(StrategyFailure {
                strategy: strategy.name().to_string(),
                error,
            });
        }

        Err(ResolveError::Exhausted {
            kind: SourceKind::Url,
            attempts,
        })
    }

    async fn resolve_pdf(&self, document: PdfDocument) -> ResolveResult<String> {
        let strategies = self.pdf_strategies.clone();
        tokio::task::spawn_blocking(move || run_pdf_chain(&strategies, &document))
            .await
            .map_err(|e| ResolveError::Task(e.to_string()))?
    }
}

/// Walk the PDF chain synchronously. Exposed for callers that already run on
/// a blocking thread.
pub fn run_pdf_chain(
    strategies: &[Arc<dyn PdfStrategy>],
    document: &PdfDocument,
) -> ResolveResult<String> {
    let mut attempts = Vec::new();

    for strategy in strategies {
        if !strategy.accepts(document) {
            debug!(strategy = strategy.name(), "PDF strategy skipped for this input");
            continue;
        }

        let error = match strategy.extract_pages(document) {
            Ok(pages) => {
                let text = merge_pages(&pages);
                if !text.is_empty() {
                    info!(
                        strategy = strategy.name(),
                        pages = pages.len(),
                        chars = text.len(),
                        "PDF text extracted"
                    );
                    return Ok(text);
                }
                StrategyError::Empty
            }
            Err(e) => e,
        };

        warn!(strategy = strategy.name(), error = %error, "PDF extraction failed");
        attempts.push(StrategyFailure {
            strategy: strategy.name().to_string(),
            error,
        });
    }

    Err(ResolveError::Exhausted {
        kind: SourceKind::Pdf,
        attempts,
    })
}
