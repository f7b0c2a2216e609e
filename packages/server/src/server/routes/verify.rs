use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::domains::verification::{verify_article, VerificationResult};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub article_text: Option<String>,
}

/// Fact-check an article with the LLM
pub async fn verify_handler(
    Extension(state): Extension<AppState>,
    JsonBody(request): JsonBody<VerifyRequest>,
) -> Result<Json<VerificationResult>, ApiError> {
    let article_text = request
        .article_text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ApiError::Input("article_text is required".to_string()))?;

    let result = verify_article(state.server_deps.chat.as_ref(), &article_text).await?;
    Ok(Json(result))
}
