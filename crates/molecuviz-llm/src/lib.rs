//! molecuviz-llm — LLM backend abstraction and the chemistry AI gateway.
//!
//! `backend` talks to the provider, `prompts` and `knowledge` build what is
//! sent, and `gateway` ties them to the interaction store.

pub mod backend;
pub mod gateway;
pub mod knowledge;
pub mod prompts;

pub use backend::{AzureOpenAiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message, MockBackend};
pub use gateway::AiGateway;
