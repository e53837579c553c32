//! Text generation providers.
//!
//! The chat handler only sees `TextGenerator`, so the backend (Gemini, mock)
//! is chosen at startup from configuration.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{GenerationConfig, ProviderKind};
use crate::services::prompt::PromptTemplate;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use mock::MockGenerator;

/// Error type for provider operations.
///
/// The `Display` text is returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by the model provider")]
    RateLimited,

    #[error("Response blocked by the model's content filter")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Generation timed out after {0}s")]
    Timeout(u64),
}

/// Converts a prompt into a completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Build the generator selected by `GENAI_PROVIDER`.
pub fn from_config(config: &GenerationConfig) -> Result<Arc<dyn TextGenerator>, ProviderError> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiGenerator::new(
            GeminiConfig {
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                api_base: config.api_base.clone(),
            },
            PromptTemplate::new(config.prompt_preamble.clone()),
        )?),
        ProviderKind::Mock => Arc::new(MockGenerator::new(true)),
    };

    Ok(generator)
}
