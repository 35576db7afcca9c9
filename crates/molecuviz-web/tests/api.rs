//! End-to-end HTTP tests against the full router with a stub LLM provider.
//!
//! ```bash
//! cargo test --package molecuviz-web --test api
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use molecuviz_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse};
use molecuviz_report::layout::extract_pages;
use molecuviz_web::router::build_router;
use molecuviz_web::state::AppState;

/// Deterministic provider: fixed reply (or failure) and a call counter.
struct StubBackend {
    reply: Result<&'static str, u16>,
    calls: AtomicUsize,
}

impl StubBackend {
    fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text), calls: AtomicUsize::new(0) })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self { reply: Err(status), calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for StubBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Ok(text) => Ok(LlmResponse {
                content: text.to_string(),
                model: "stub".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            }),
            Err(status) => Err(LlmError::ApiError { status, message: "provider exploded".to_string() }),
        }
    }

    fn model_id(&self) -> &str { "stub-deployment" }
    fn service_name(&self) -> &str { "stub" }
}

fn app(backend: Arc<StubBackend>) -> Router {
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
    build_router(AppState::new(backend, 16, static_dir))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>, Option<String>) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, bytes, disposition)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_ask_then_report_surfaces_interaction() {
    let backend = StubBackend::replying("Water is polar.");
    let app = app(backend.clone());

    let (status, body, _) = post_json(
        &app,
        "/api/ask-ai",
        json!({ "question": "What is water?", "current_molecule": "Water (H2O)" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({ "response": "Water is polar.", "success": true }));
    assert_eq!(backend.calls(), 1);

    let (status, pdf, disposition) = post_json(
        &app,
        "/api/generate-pdf",
        json!({
            "molecule_name": "Water",
            "molecule_formula": "H2O",
            "molecule_info": { "polarity": "Polar", "molecularWeight": "18.015 g/mol" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(disposition.as_deref(), Some("attachment; filename=\"Water_report.pdf\""));

    let text = extract_pages(&pdf).unwrap().concat();
    assert!(text.contains("Q: What is water?"));
    assert!(text.contains("A: Water is polar."));
    assert!(text.contains("Polarity: Polar"));
    assert!(text.contains("Bond Angle: N/A"));
}

#[tokio::test]
async fn test_explain_between_ask_and_report_keeps_the_question() {
    let app = app(StubBackend::replying("Water is polar."));

    post_json(&app, "/api/ask-ai", json!({ "question": "What is water?", "current_molecule": "Water (H2O)" })).await;
    let (status, _, _) = post_json(
        &app,
        "/api/explain-molecule",
        json!({ "molecule_name": "Water", "molecule_formula": "H2O" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, pdf, _) = post_json(
        &app,
        "/api/generate-pdf",
        json!({ "molecule_name": "Water", "molecule_formula": "H2O", "molecule_info": {} }),
    )
    .await;
    let text = extract_pages(&pdf).unwrap().concat();
    assert!(text.contains("Q: What is water?"));
    assert!(!text.contains("Explain the molecule"));
}

#[tokio::test]
async fn test_null_optional_fields_are_accepted() {
    let app = app(StubBackend::replying("ok"));

    let cases = [
        ("/api/ask-ai",           json!({ "question": "What is water?", "current_molecule": null })),
        ("/api/explain-molecule", json!({ "molecule_name": "Water", "molecule_formula": null })),
        ("/api/generate-pdf",     json!({ "molecule_name": "Water", "molecule_formula": null, "molecule_info": null })),
        ("/api/preview-pdf",      json!({ "molecule_name": "Water", "molecule_info": null })),
    ];
    for (uri, body) in cases {
        let (status, _, _) = post_json(&app, uri, body).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }

    // A null required field reads as missing: validation error, not a parse error.
    let (status, bytes, _) = post_json(&app, "/api/ask-ai", json!({ "question": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&bytes)["error"], json!("No question provided"));
}

#[tokio::test]
async fn test_preview_is_inline_and_without_interaction_uses_fallback() {
    let app = app(StubBackend::replying("unused"));
    let (status, pdf, disposition) = post_json(
        &app,
        "/api/preview-pdf",
        json!({ "molecule_name": "Methane", "molecule_formula": "CH4" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.unwrap().starts_with("inline;"));

    let text = extract_pages(&pdf).unwrap().concat();
    assert!(text.contains("No recent AI interaction recorded for this molecule."));
    assert!(text.contains("No description available."));
    assert!(text.contains("No uses listed."));
}

#[tokio::test]
async fn test_generate_pdf_with_blank_name_is_400() {
    let app = app(StubBackend::replying("unused"));
    let (status, body, disposition) = post_json(
        &app,
        "/api/generate-pdf",
        json!({ "molecule_name": "", "molecule_formula": "H2O", "molecule_info": {} }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(disposition.is_none());
    assert!(!body.starts_with(b"%PDF"));
    let body = as_json(&body);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_required_fields_are_400_without_upstream_call() {
    let backend = StubBackend::replying("unused");
    let app = app(backend.clone());

    let cases = [
        ("/api/ask-ai",             json!({ "current_molecule": "Water (H2O)" })),
        ("/api/ask-ai",             json!({ "question": "   " })),
        ("/api/explain-molecule",   json!({ "molecule_formula": "H2O" })),
        ("/api/compare-molecules",  json!({ "molecule1": "Water" })),
        ("/api/predict-properties", json!({})),
        ("/api/preview-pdf",        json!({ "molecule_formula": "H2O" })),
    ];
    for (uri, body) in cases {
        let (status, bytes, _) = post_json(&app, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let body = as_json(&bytes);
        assert!(!body["error"].as_str().unwrap().is_empty(), "{uri}");
        assert_eq!(body["success"], json!(false));
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_structured_400() {
    let backend = StubBackend::replying("unused");
    let app = app(backend.clone());
    let req = Request::builder()
        .method("POST")
        .uri("/api/ask-ai")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = as_json(&to_bytes(resp.into_body(), usize::MAX).await.unwrap());
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_500_and_not_retried() {
    let backend = StubBackend::failing(503);
    let app = app(backend.clone());

    let (status, body, _) = post_json(
        &app,
        "/api/explain-molecule",
        json!({ "molecule_name": "Water", "molecule_formula": "H2O" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = as_json(&body);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("provider exploded"));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_each_ai_endpoint_response_shape() {
    let app = app(StubBackend::replying("  answer  "));

    let cases = [
        ("/api/explain-molecule",   json!({ "molecule_name": "Water" }),                       "explanation"),
        ("/api/compare-molecules",  json!({ "molecule1": "Water", "molecule2": "Methane" }), "comparison"),
        ("/api/predict-properties", json!({ "formula": "NH3" }),                              "predictions"),
    ];
    for (uri, body, field) in cases {
        let (status, bytes, _) = post_json(&app, uri, body).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let body = as_json(&bytes);
        assert_eq!(body[field], json!("answer"), "{uri}");
        assert_eq!(body["success"], json!(true), "{uri}");
    }
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = app(StubBackend::replying("unused"));
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({ "status": "healthy", "ai_service": "stub", "deployment": "stub-deployment" })
    );
}

#[tokio::test]
async fn test_static_index_and_missing_file() {
    let app = app(StubBackend::replying("unused"));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("<title>MolecuViz</title>"));

    let (status, _) = get(&app, "/index.html").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/js/does-not-exist.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
