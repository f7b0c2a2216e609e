use axum::{extract::Extension, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use extraction::ArticleSource;
use serde::{Deserialize, Serialize};

use crate::common::{Label, Verdict};
use crate::domains::classification::Probabilities;
use crate::domains::prediction::{run_prediction, PredictionOutcome};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub input_type: Option<String>,
    pub text: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub pdf_path: Option<String>,
    pub pdf_base64: Option<String>,
    pub context_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutoVerification {
    pub prediction: Verdict,
    pub reasoning: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub article_text: String,
    pub context_id: String,
    pub label: Label,
    pub confidence: f32,
    pub needs_verification: bool,
    pub probabilities: Probabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_verification: Option<AutoVerification>,
}

impl From<PredictionOutcome> for PredictResponse {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            article_text: outcome.article_text,
            context_id: outcome.context_id,
            label: outcome.inference.label,
            confidence: outcome.inference.confidence,
            needs_verification: outcome.inference.needs_verification,
            probabilities: outcome.inference.probabilities,
            auto_verification: outcome.auto_verification.map(|v| AutoVerification {
                prediction: v.prediction,
                reasoning: v.reasoning,
            }),
        }
    }
}

/// Classify an article given as text, URL or PDF
pub async fn predict_handler(
    Extension(state): Extension<AppState>,
    JsonBody(request): JsonBody<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let source = source_from_request(&request)?;
    let context_id = request.context_id.clone();

    let outcome = run_prediction(&state.server_deps, source, context_id)
        .await
        .map_err(ApiError::from_prediction)?;

    Ok(Json(outcome.into()))
}

fn source_from_request(request: &PredictRequest) -> Result<ArticleSource, ApiError> {
    let input_type = request
        .input_type
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .unwrap_or_else(|| "text".to_string());

    match input_type.as_str() {
        "text" => {
            // Presence check only: whitespace-only text is passed through as is
            let text = non_empty(&request.text)
                .or_else(|| non_empty(&request.content))
                .ok_or_else(|| ApiError::Input("No text provided.".to_string()))?;
            Ok(ArticleSource::Text(text.to_string()))
        }
        "url" => {
            let url = non_blank(&request.url)
                .or_else(|| non_blank(&request.content))
                .ok_or_else(|| ApiError::Input("URL missing for url input type.".to_string()))?;
            Ok(ArticleSource::Url(url.trim().to_string()))
        }
        "pdf" => {
            if let Some(path) = non_blank(&request.pdf_path) {
                return Ok(ArticleSource::PdfPath(path.into()));
            }
            let encoded = non_blank(&request.pdf_base64).ok_or_else(|| {
                ApiError::Input("PDF input requires pdf_path or pdf_base64.".to_string())
            })?;
            let bytes = STANDARD
                .decode(encoded.trim())
                .map_err(|e| ApiError::Input(format!("Invalid pdf_base64: {}", e)))?;
            Ok(ArticleSource::PdfBytes(bytes))
        }
        other => Err(ApiError::Input(format!("Unsupported input_type '{}'.", other))),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
