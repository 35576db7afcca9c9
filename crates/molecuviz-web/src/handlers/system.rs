//! Service health.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub ai_service: String,
    pub deployment: String,
}

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<HealthReport> {
    let backend = state.gateway.backend();
    Json(HealthReport {
        status: "healthy",
        ai_service: backend.service_name().to_string(),
        deployment: backend.model_id().to_string(),
    })
}
