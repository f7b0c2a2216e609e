use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    status: &'static str,
}

/// Append a line to the development progress log
pub async fn log_handler(
    Extension(state): Extension<AppState>,
    JsonBody(request): JsonBody<LogRequest>,
) -> Result<Json<LogResponse>, ApiError> {
    let message = request
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::Input("message is required".to_string()))?;

    let progress = state.server_deps.progress.clone();
    tokio::task::spawn_blocking(move || progress.record(&message))
        .await
        .map_err(|e| ApiError::unexpected("Logging", e))?
        .map_err(|e| ApiError::unexpected("Logging", e))?;

    Ok(Json(LogResponse { status: "logged" }))
}
