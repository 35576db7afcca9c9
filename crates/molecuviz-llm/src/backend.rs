//! LLM backend trait and concrete implementations.
//!
//! Backends:
//!   AzureOpenAiBackend — Azure OpenAI chat-completions deployment
//!   MockBackend        — keyword-matched canned answers, no network

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
    #[error("Provider returned an empty completion")]
    EmptyResponse,
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,   // "system" | "user" | "assistant"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    /// Deployment or model identifier reported by `/api/health`.
    fn model_id(&self) -> &str;
    /// Short service label reported by `/api/health`.
    fn service_name(&self) -> &str;
}

// ── Helper: parse OpenAI-style response ──────────────────────────────────────

fn parse_openai_response(json: &serde_json::Value, fallback_model: &str) -> Result<LlmResponse, LlmError> {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(LlmError::EmptyResponse)?
        .to_string();

    Ok(LlmResponse {
        content,
        model: json["model"]
            .as_str()
            .unwrap_or(fallback_model)
            .to_string(),
        prompt_tokens:     json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    })
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    if status >= 400 {
        // Provider error bodies are usually JSON but gateways in front of
        // them sometimes answer with plain text.
        let body: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| if text.is_empty() { "unknown API error".to_string() } else { text.clone() });
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(serde_json::from_str(&text)?)
}

// ── 1. Azure OpenAI ───────────────────────────────────────────────────────────

pub struct AzureOpenAiBackend {
    pub endpoint: String,
    pub api_version: String,
    pub deployment: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl AzureOpenAiBackend {
    pub fn new(
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        deployment: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_version: api_version.into(),
            deployment: deployment.into(),
            api_key,
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version,
        )
    }
}

#[async_trait]
impl LlmBackend for AzureOpenAiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        // The deployment selects the model; Azure ignores a "model" field.
        let body = serde_json::json!({
            "messages":    req.messages,
            "max_tokens":  req.max_tokens.unwrap_or(500),
            "temperature": req.temperature.unwrap_or(0.7),
        });
        let resp = self.client
            .post(self.completions_url())
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;
        parse_openai_response(&json, &self.deployment)
    }

    fn model_id(&self) -> &str { &self.deployment }
    fn service_name(&self) -> &str { "azure_openai" }
}

// ── 2. Mock (keyword matched) ─────────────────────────────────────────────────

const MOCK_ANSWERS: &[(&str, &str)] = &[
    ("water", "Water (H\u{2082}O) is a polar molecule with a bent geometry and 104.5\u{b0} bond angle. \
        The oxygen atom has two lone pairs, creating the bent shape. Water is essential for life and has \
        unique properties like a high boiling point due to hydrogen bonding."),
    ("methane", "Methane (CH\u{2084}) is a tetrahedral molecule with 109.5\u{b0} bond angles. It's nonpolar \
        due to its symmetrical structure. Methane is the main component of natural gas and the simplest alkane."),
    ("benzene", "Benzene (C\u{2086}H\u{2086}) is an aromatic compound with a hexagonal ring structure. All bond \
        angles are 120\u{b0}, and it exhibits resonance. Benzene is nonpolar and serves as the basis for many \
        organic compounds."),
];

const CURRENT_MOLECULE_PREFIX: &str = "Currently viewing molecule:";

/// Offline backend answering from a small keyword table.
///
/// The user message is matched first, then the molecule named on the
/// system prompt's "Currently viewing molecule:" line.
#[derive(Debug, Default, Clone)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }

    fn answer_for(&self, messages: &[Message]) -> String {
        let question = messages.iter()
            .filter(|m| m.role == "user")
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let current = messages.iter()
            .filter(|m| m.role == "system")
            .flat_map(|m| m.content.lines())
            .find_map(|line| line.trim().strip_prefix(CURRENT_MOLECULE_PREFIX))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let current_lower = current.to_lowercase();

        for (keyword, answer) in MOCK_ANSWERS {
            if question.contains(keyword) || current_lower.contains(keyword) {
                return answer.to_string();
            }
        }

        let subject = if current.is_empty() { "this molecule".to_string() } else { current };
        format!(
            "I can help explain molecular structures, bonding, polarity, and chemical properties. \
             {} has interesting chemical characteristics that relate to its structure and electron \
             arrangement. What specific aspect would you like to know more about?",
            subject
        )
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let content = self.answer_for(&req.messages);
        Ok(LlmResponse {
            completion_tokens: content.split_whitespace().count() as u32,
            content,
            model: "mock".to_string(),
            prompt_tokens: 0,
        })
    }

    fn model_id(&self) -> &str { "mock" }
    fn service_name(&self) -> &str { "mock" }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn azure() -> AzureOpenAiBackend {
        AzureOpenAiBackend::new(
            "https://example.openai.azure.com/",
            "2024-02-01",
            "gpt-4o",
            SecretString::from("test-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_azure_url_layout() {
        let b = azure();
        assert_eq!(
            b.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01"
        );
        assert_eq!(b.model_id(), "gpt-4o");
        assert_eq!(b.service_name(), "azure_openai");
    }

    #[test]
    fn test_parse_openai_response() {
        let json = serde_json::json!({
            "model": "gpt-4o-2024",
            "choices": [{ "message": { "role": "assistant", "content": "  Water is polar. " } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 4 }
        });
        let resp = parse_openai_response(&json, "fallback").unwrap();
        assert_eq!(resp.content, "  Water is polar. ");
        assert_eq!(resp.model, "gpt-4o-2024");
        assert_eq!(resp.prompt_tokens, 12);
    }

    #[test]
    fn test_parse_response_without_content_is_error() {
        let json = serde_json::json!({ "choices": [] });
        assert!(matches!(parse_openai_response(&json, "m"), Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_mock_matches_question_keyword() {
        let req = LlmRequest {
            messages: vec![Message::system("You are an assistant."), Message::user("Tell me about Benzene")],
            max_tokens: None,
            temperature: None,
        };
        let resp = MockBackend::new().complete(req).await.unwrap();
        assert!(resp.content.starts_with("Benzene"));
    }

    #[tokio::test]
    async fn test_mock_matches_current_molecule() {
        let req = LlmRequest {
            messages: vec![
                Message::system("Known: Water, Methane, Benzene\nCurrently viewing molecule: Methane (CH4)"),
                Message::user("What shape is it?"),
            ],
            max_tokens: None,
            temperature: None,
        };
        let resp = MockBackend::new().complete(req).await.unwrap();
        assert!(resp.content.starts_with("Methane"));
    }

    #[tokio::test]
    async fn test_mock_default_mentions_molecule() {
        let req = LlmRequest {
            messages: vec![
                Message::system("Currently viewing molecule: Ethanol (C2H5OH)"),
                Message::user("Is it flammable?"),
            ],
            max_tokens: None,
            temperature: None,
        };
        let resp = MockBackend::new().complete(req).await.unwrap();
        assert!(resp.content.contains("Ethanol (C2H5OH)"));
    }
}
