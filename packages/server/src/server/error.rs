//! HTTP error mapping.
//!
//! Client mistakes and unreadable documents are 400, a missing LLM key is 503,
//! upstream LLM failures are 502, and anything else is a logged 500 carrying
//! `{error, details}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use extraction::ResolveError;
use llm_client::LlmError;
use serde_json::json;
use tracing::{error, warn};

use crate::domains::prediction::PredictionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request data
    #[error("{0}")]
    Input(String),

    /// The document could not be turned into text
    #[error("{0}")]
    Extraction(String),

    /// A required service is not configured
    #[error("{0}")]
    Config(String),

    /// The remote LLM failed or could not be reached
    #[error("{0}")]
    Remote(String),

    #[error("{operation} failed: {details}")]
    Unexpected {
        operation: &'static str,
        details: String,
    },
}

impl ApiError {
    pub fn unexpected(operation: &'static str, details: impl ToString) -> Self {
        ApiError::Unexpected {
            operation,
            details: details.to_string(),
        }
    }

    /// Map a resolver failure; internal resolver faults become `Unexpected`.
    pub fn from_resolve(operation: &'static str, err: ResolveError) -> Self {
        match err {
            ResolveError::Input(message) => ApiError::Input(message),
            ResolveError::Exhausted { .. } => ApiError::Extraction(err.to_string()),
            ResolveError::UnknownStrategy { .. } | ResolveError::Task(_) => {
                Self::unexpected(operation, err)
            }
        }
    }

    pub fn from_prediction(err: PredictionError) -> Self {
        match err {
            PredictionError::Resolve(err) => Self::from_resolve("Prediction", err),
            PredictionError::Classification(details) => Self::unexpected("Prediction", details),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) | ApiError::Extraction(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Remote(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Config(message) => ApiError::Config(message),
            other => ApiError::Remote(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Unexpected { operation, details } => {
                error!(operation = %operation, details = %details, "Request failed unexpectedly");
                json!({ "error": format!("{} failed", operation), "details": details })
            }
            other => {
                warn!(status = status.as_u16(), error = %other, "Request rejected");
                json!({ "error": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
