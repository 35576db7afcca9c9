//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    ai::{ask_ai, explain_molecule, compare_molecules, predict_properties},
    report::{generate_pdf, preview_pdf},
    system::health,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    // `/` resolves to index.html; unknown paths are a 404.
    let static_files = ServeDir::new(&state.static_dir);
    let shared: SharedState = Arc::new(state);

    Router::new()
        // AI assistant
        .route("/api/ask-ai",             post(ask_ai))
        .route("/api/explain-molecule",   post(explain_molecule))
        .route("/api/compare-molecules",  post(compare_molecules))
        .route("/api/predict-properties", post(predict_properties))

        // Reports
        .route("/api/generate-pdf", post(generate_pdf))
        .route("/api/preview-pdf",  post(preview_pdf))

        .route("/api/health", get(health))

        // Front-end
        .fallback_service(static_files)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
