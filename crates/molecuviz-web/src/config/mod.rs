//! Configuration loading for MolecuViz.
//! Reads molecuviz.toml from the current directory or the path in the
//! MOLECUVIZ_CONFIG env var, then applies environment overrides (a `.env`
//! file is honoured). The file is optional; the environment alone is enough.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding index.html and the front-end assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 5000 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmMode {
    /// Azure OpenAI chat completions; all provider settings required.
    Azure,
    /// Keyword-matched canned answers, no network.
    Mock,
}

fn default_llm_mode() -> LlmMode { LlmMode::Azure }

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_mode")]
    pub mode: LlmMode,
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub api_key: Option<SecretString>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: default_llm_mode(),
            endpoint: None,
            api_version: None,
            deployment: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Molecules remembered for the report's "Recent AI Interaction" section.
    #[serde(default = "default_store_capacity")]
    pub capacity: usize,
}

fn default_store_capacity() -> usize { molecuviz_common::interactions::DEFAULT_STORE_CAPACITY }

impl Default for StoreConfig {
    fn default() -> Self {
        Self { capacity: default_store_capacity() }
    }
}

/// Azure settings after validation, ready to build a backend from.
#[derive(Debug)]
pub struct AzureSettings<'a> {
    pub endpoint: &'a str,
    pub api_version: &'a str,
    pub deployment: &'a str,
    pub api_key: &'a SecretString,
}


fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from molecuviz.toml plus the environment.
    /// Checks MOLECUVIZ_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(subsystem = "config", "Could not read .env: {e}");
            }
        }

        let path = std::env::var("MOLECUVIZ_CONFIG")
            .unwrap_or_else(|_| "molecuviz.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            tracing::info!(subsystem = "config", "No {} found, using defaults and environment", path);
            Config::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Environment wins over the file. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("AZURE_OPENAI_ENDPOINT")    { self.llm.endpoint = Some(v); }
        if let Some(v) = get("AZURE_OPENAI_API_VERSION") { self.llm.api_version = Some(v); }
        if let Some(v) = get("AZURE_OPENAI_DEPLOYMENT")  { self.llm.deployment = Some(v); }
        if let Some(v) = get("AZURE_OPENAI_API_KEY")     { self.llm.api_key = Some(SecretString::from(v)); }
        if let Some(v) = get("MOLECUVIZ_LLM_MODE") {
            match v.trim() {
                "azure" => self.llm.mode = LlmMode::Azure,
                "mock"  => self.llm.mode = LlmMode::Mock,
                other   => tracing::warn!(subsystem = "config", "Ignoring unknown MOLECUVIZ_LLM_MODE={other}"),
            }
        }
        if let Some(v) = get("MOLECUVIZ_HOST") { self.server.host = v; }
        if let Some(v) = get("MOLECUVIZ_PORT") {
            match v.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_)   => tracing::warn!(subsystem = "config", "Ignoring invalid MOLECUVIZ_PORT={v}"),
            }
        }
    }

    /// Fail fast when the selected provider cannot be reached.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.llm.mode == LlmMode::Azure {
            self.azure()?;
        }
        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Provider settings, or an error naming every missing variable.
    pub fn azure(&self) -> anyhow::Result<AzureSettings<'_>> {
        let llm = &self.llm;
        let key = llm.api_key.as_ref().filter(|k| !k.expose_secret().trim().is_empty());

        let mut missing = Vec::new();
        if non_blank(&llm.endpoint).is_none()    { missing.push("AZURE_OPENAI_ENDPOINT"); }
        if non_blank(&llm.api_version).is_none() { missing.push("AZURE_OPENAI_API_VERSION"); }
        if non_blank(&llm.deployment).is_none()  { missing.push("AZURE_OPENAI_DEPLOYMENT"); }
        if key.is_none()                         { missing.push("AZURE_OPENAI_API_KEY"); }

        match (non_blank(&llm.endpoint), non_blank(&llm.api_version), non_blank(&llm.deployment), key) {
            (Some(endpoint), Some(api_version), Some(deployment), Some(api_key)) => Ok(AzureSettings {
                endpoint,
                api_version,
                deployment,
                api_key,
            }),
            _ => anyhow::bail!(
                "LLM provider is not configured, missing: {}\n\
                 Set them in the environment (or .env), or set llm.mode = \"mock\" in molecuviz.toml.",
                missing.join(", ")
            ),
        }
    }
}
