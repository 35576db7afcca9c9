//! AI gateway: validates requests, renders prompts, calls the backend and
//! records the user's molecule-scoped questions.
//!
//! Provider failures are never retried: the first error is logged and
//! surfaced as `ApiError::Upstream`.

use std::sync::Arc;

use molecuviz_common::error::require;
use molecuviz_common::{ApiError, Interaction, InteractionStore, MoleculeKey};
use tracing::{debug, error, info, warn};

use crate::backend::{LlmBackend, LlmError, LlmRequest, Message};
use crate::prompts::{self, Prompt};

#[derive(Clone)]
pub struct AiGateway {
    backend: Arc<dyn LlmBackend>,
    store: Arc<InteractionStore>,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn LlmBackend>, store: Arc<InteractionStore>) -> Self {
        Self { backend, store }
    }

    pub fn backend(&self) -> &dyn LlmBackend {
        self.backend.as_ref()
    }

    /// Single request/response exchange with the provider; returns the trimmed text.
    pub async fn call_model(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let req = LlmRequest {
            messages: vec![Message::system(system), Message::user(user)],
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
        };
        let resp = self.backend.complete(req).await?;
        debug!(
            model = %resp.model,
            prompt_tokens = resp.prompt_tokens,
            completion_tokens = resp.completion_tokens,
            "LLM call completed"
        );
        Ok(resp.content.trim().to_string())
    }

    pub async fn ask(&self, question: &str, current_molecule: &str) -> Result<String, ApiError> {
        let question = validated("ask", require(question, "No question provided"))?;
        let prompt = prompts::ask(question, current_molecule);
        let answer = self.run("ask", &prompt).await?;

        if let Some(key) = MoleculeKey::from_current(current_molecule) {
            info!(molecule = %key, "recorded AI interaction");
            self.store.put(key.clone(), Interaction::now(key, question, answer.clone()));
        }
        Ok(answer)
    }

    /// Leaves the store alone: only questions the user typed are recorded.
    pub async fn explain(&self, name: &str, formula: &str) -> Result<String, ApiError> {
        let name = validated("explain", require(name, "No molecule specified"))?;
        self.run("explain", &prompts::explain(name, formula.trim())).await
    }

    pub async fn compare(&self, first: &str, second: &str) -> Result<String, ApiError> {
        let first = validated("compare", require(first, "Two molecules are required for comparison"))?;
        let second = validated("compare", require(second, "Two molecules are required for comparison"))?;
        self.run("compare", &prompts::compare(first, second)).await
    }

    pub async fn predict(&self, formula: &str) -> Result<String, ApiError> {
        let formula = validated("predict", require(formula, "No formula provided"))?;
        self.run("predict", &prompts::predict(formula)).await
    }

    async fn run(&self, endpoint: &'static str, prompt: &Prompt) -> Result<String, ApiError> {
        self.call_model(&prompt.system, &prompt.user, prompt.max_tokens, prompt.temperature)
            .await
            .map_err(|e| {
                error!(subsystem = "ai", endpoint, error = %e, "LLM provider call failed");
                ApiError::Upstream(format!("AI service error: {}", e))
            })
    }
}

fn validated<T>(endpoint: &'static str, field: Result<T, ApiError>) -> Result<T, ApiError> {
    field.inspect_err(|e| warn!(subsystem = "ai", endpoint, error = %e, "rejected AI request"))
}
