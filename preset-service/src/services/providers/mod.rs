//! AI provider abstractions and implementations.

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The provider answered with its own error envelope.
    #[error("AI error: {message}")]
    Api { message: String, code: Option<i32> },

    #[error("AI returned no content")]
    NoContent,

    #[error("no usable AI models found")]
    NoUsableModel,

    #[error("Network error: {0}")]
    Network(String),
}

/// Trait for preset text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate raw preset text for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
