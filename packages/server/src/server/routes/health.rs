use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    model: String,
    device: String,
}

/// Health check endpoint
///
/// Loads the classifier on first call. Always returns 200 OK; a model that
/// failed to load is reported as `degraded`.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let classifier = &state.server_deps.classifier;

    let model_ready = match classifier.ensure_loaded().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Model failed to load");
            false
        }
    };

    let (status, model) = if model_ready {
        ("ok", "ready")
    } else {
        ("degraded", "error")
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            model: model.to_string(),
            device: classifier.device_name(),
        }),
    )
}
