//! PDF report endpoints. Both build the same document; they differ only in
//! the Content-Disposition the browser gets.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use molecuviz_common::error::require;
use molecuviz_common::{ApiError, MoleculeKey};
use molecuviz_report::{build_report, ReportRequest};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::handlers::{json_body, null_as_default};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule_formula: String,
    /// Front-end metadata: description, molecularWeight, bondAngle, polarity, uses…
    #[serde(default, deserialize_with = "null_as_default")]
    pub molecule_info: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Attachment,
    Inline,
}

impl Disposition {
    fn header_value(self, molecule_name: &str) -> String {
        let kind = match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline     => "inline",
        };
        format!("{}; filename=\"{}\"", kind, report_filename(molecule_name))
    }
}

/// `Water` → `Water_report.pdf`; anything outside `[A-Za-z0-9_-]` becomes `_`.
pub fn report_filename(molecule_name: &str) -> String {
    let stem: String = molecule_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}_report.pdf", stem)
}

/// Metadata values arrive as arbitrary JSON; strings are kept verbatim,
/// numbers and booleans are printed, null is dropped.
fn flatten_info(info: HashMap<String, Value>) -> HashMap<String, String> {
    info.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

/// POST /api/generate-pdf
pub async fn generate_pdf(
    State(state): State<SharedState>,
    payload: Result<Json<PdfRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    render(&state, json_body(payload)?, Disposition::Attachment)
}

/// POST /api/preview-pdf
pub async fn preview_pdf(
    State(state): State<SharedState>,
    payload: Result<Json<PdfRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    render(&state, json_body(payload)?, Disposition::Inline)
}

fn render(state: &SharedState, req: PdfRequest, disposition: Disposition) -> Result<Response, ApiError> {
    let name = require(&req.molecule_name, "No molecule specified")
        .inspect_err(|e| warn!(subsystem = "report", error = %e, "rejected report request"))?
        .to_string();
    let formula = req.molecule_formula.trim().to_string();

    let key = MoleculeKey::new(&name, &formula);
    let recent_qa = state.store.get(&key);

    let report = ReportRequest {
        name: name.clone(),
        formula,
        properties: flatten_info(req.molecule_info),
        recent_qa,
    };
    let bytes = build_report(&report).map_err(|e| {
        error!(subsystem = "report", molecule = %key, error = %e, "PDF generation failed");
        ApiError::Internal(format!("PDF generation error: {}", e))
    })?;

    info!(
        molecule = %key,
        with_interaction = report.recent_qa.is_some(),
        bytes = bytes.len(),
        "generated report"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition.header_value(&name)),
    ];
    Ok((headers, bytes).into_response())
}
