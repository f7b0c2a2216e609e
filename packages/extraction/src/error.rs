//! Typed errors for text resolution.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the server can map
//! each failure class onto its own HTTP status.

use thiserror::Error;

use crate::source::SourceKind;

/// Errors surfaced by [`TextResolver`](crate::TextResolver).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request did not carry a usable payload for its source type.
    #[error("{0}")]
    Input(String),

    /// Every strategy for the source type failed or produced no text.
    #[error("{}", exhausted_message(.kind))]
    Exhausted {
        kind: SourceKind,
        attempts: Vec<StrategyFailure>,
    },

    /// A configured strategy name is not registered for the source type.
    #[error("unknown {kind} extraction strategy: {name}")]
    UnknownStrategy { kind: SourceKind, name: String },

    /// Background extraction task did not complete.
    #[error("extraction task failed: {0}")]
    Task(String),
}

fn exhausted_message(kind: &SourceKind) -> &'static str {
    match kind {
        SourceKind::Text => "No text provided.",
        SourceKind::Url => "Unable to extract content from URL.",
        SourceKind::Pdf => "Unable to extract text from PDF.",
    }
}

/// A single strategy's failure, kept for diagnostics.
#[derive(Debug)]
pub struct StrategyFailure {
    pub strategy: String,
    pub error: StrategyError,
}

/// Errors a single extraction strategy can report.
///
/// The resolver never propagates these directly; they are logged and the next
/// strategy is tried.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// The document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Extraction succeeded but produced no text
    #[error("no text extracted")]
    Empty,

    /// The backing library is not available in this build or environment
    #[error("strategy unavailable: {0}")]
    Unavailable(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for resolver operations.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Result type alias for strategy operations.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;

impl ResolveError {
    /// True for failures caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ResolveError::Input(_) | ResolveError::Exhausted { .. })
    }
}
