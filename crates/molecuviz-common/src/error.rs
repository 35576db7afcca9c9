//! HTTP-facing error taxonomy.
//!
//! Every handler returns `Result<_, ApiError>`; nothing escapes the endpoint
//! boundary as a raw fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field was missing or blank.
    #[error("{0}")]
    Validation(String),

    /// The LLM provider call failed.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    NotFound(String),

    /// Anything else that went wrong while serving the request (e.g. PDF rendering).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)   => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for the common "field X is required" rejection.
    pub fn missing(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error":   self.to_string(),
            "success": false,
        });
        (status, Json(body)).into_response()
    }
}

/// Trim a request field and reject it if nothing is left.
pub fn require<'a>(value: &'a str, message: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::missing(message))
    } else {
        Ok(trimmed)
    }
}
