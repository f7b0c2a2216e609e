//! Lenient JSON body extractor.
//!
//! Bodies are read as JSON whatever the `Content-Type` says. An empty body or
//! a literal `null` becomes the request's default value, and anything that
//! does not deserialize is an [`ApiError::Input`] so clients always get the
//! `{error}` JSON shape.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::server::error::ApiError;

/// Request body decoded from JSON, falling back to `T::default()` when absent.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Input(e.body_text()))?;

        decode_body(&bytes).map(JsonBody)
    }
}

fn decode_body<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::Input(format!("Request body is not valid JSON: {}", e)))?;
    if value.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(value).map_err(|e| ApiError::Input(format!("Invalid request body: {}", e)))
}
