//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use molecuviz_common::InteractionStore;
use molecuviz_llm::{AiGateway, AzureOpenAiBackend, LlmBackend, MockBackend};
use secrecy::{ExposeSecret, SecretString};

use crate::config::{Config, LlmMode};

/// Shared state injected into every Axum handler. Built once at startup;
/// nothing in the process is reachable outside of it.
#[derive(Clone)]
pub struct AppState {
    pub gateway: AiGateway,
    pub store: Arc<InteractionStore>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(backend: Arc<dyn LlmBackend>, store_capacity: usize, static_dir: impl Into<PathBuf>) -> Self {
        let store = Arc::new(InteractionStore::new(store_capacity));
        Self {
            gateway: AiGateway::new(backend, store.clone()),
            store,
            static_dir: static_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend: Arc<dyn LlmBackend> = match config.llm.mode {
            LlmMode::Azure => {
                let azure = config.azure()?;
                Arc::new(AzureOpenAiBackend::new(
                    azure.endpoint,
                    azure.api_version,
                    azure.deployment,
                    SecretString::from(azure.api_key.expose_secret().to_string()),
                    Duration::from_secs(config.llm.timeout_secs),
                )?)
            }
            LlmMode::Mock => {
                tracing::warn!(subsystem = "ai", "LLM mode is \"mock\": answers come from a canned keyword table");
                Arc::new(MockBackend::new())
            }
        };
        Ok(Self::new(backend, config.store.capacity, &config.server.static_dir))
    }
}

pub type SharedState = Arc<AppState>;
