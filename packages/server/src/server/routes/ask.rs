use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domains::conversation::{answer_question, QuestionRequest};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskRequest {
    pub question: Option<String>,
    pub context_id: Option<String>,
    pub article_text: Option<String>,
    pub model_prediction: Option<String>,
    pub verification_summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Answer a question, about a classified article when one is referenced
pub async fn ask_handler(
    Extension(state): Extension<AppState>,
    JsonBody(request): JsonBody<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = request
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::Input("question is required".to_string()))?;

    let question = QuestionRequest {
        question,
        context_id: request.context_id,
        article_text: request.article_text,
        model_prediction: request.model_prediction,
        verification_summary: request.verification_summary,
    };

    let deps = &state.server_deps;
    let answer = answer_question(deps.chat.as_ref(), &deps.contexts, &question).await?;
    Ok(Json(AskResponse { answer }))
}
