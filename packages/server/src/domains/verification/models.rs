use serde::Serialize;

use crate::common::Verdict;

/// Outcome of one fact-check call.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub prediction: Verdict,
    pub reasoning: String,
    /// Untouched chat-completions response body
    pub raw: serde_json::Value,
}
