//! AI chemistry assistant endpoints. Each one validates, delegates to the
//! gateway and wraps the text in the JSON shape the front-end expects.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use molecuviz_common::ApiError;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::{json_body, null_as_default};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_molecule: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule_formula: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule2: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub formula: String,
}

/// POST /api/ask-ai
pub async fn ask_ai(
    State(state): State<SharedState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(payload)?;
    let response = state.gateway.ask(&req.question, &req.current_molecule).await?;
    Ok(Json(json!({ "response": response, "success": true })))
}

/// POST /api/explain-molecule
pub async fn explain_molecule(
    State(state): State<SharedState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(payload)?;
    let explanation = state.gateway.explain(&req.molecule_name, &req.molecule_formula).await?;
    Ok(Json(json!({ "explanation": explanation, "success": true })))
}

/// POST /api/compare-molecules
pub async fn compare_molecules(
    State(state): State<SharedState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(payload)?;
    let comparison = state.gateway.compare(&req.molecule1, &req.molecule2).await?;
    Ok(Json(json!({ "comparison": comparison, "success": true })))
}

/// POST /api/predict-properties
pub async fn predict_properties(
    State(state): State<SharedState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(payload)?;
    let predictions = state.gateway.predict(&req.formula).await?;
    Ok(Json(json!({ "predictions": predictions, "success": true })))
}
