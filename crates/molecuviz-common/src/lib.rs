//! molecuviz-common — Shared types and errors used across all MolecuViz crates.

pub mod error;
pub mod interactions;

// Re-export commonly used types
pub use error::ApiError;
pub use interactions::{Interaction, InteractionStore, MoleculeKey};
