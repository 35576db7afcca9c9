//! HTTP handlers for all web routes.

pub mod ai;
pub mod report;
pub mod system;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use molecuviz_common::ApiError;
use serde::{Deserialize, Deserializer};

/// Unwrap a JSON body, turning axum's plain-text rejection into the
/// structured 400 every endpoint promises.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!(subsystem = "http", error = %rejection.body_text(), "rejected request body");
            Err(ApiError::Validation(format!("Invalid request body: {}", rejection.body_text())))
        }
    }
}

/// Field deserializer treating an explicit JSON `null` like a missing key.
/// Pair with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
