//! Text generation capability used by the summarization agent.
//!
//! [`TextGenerator`] is the seam between the fallback chain and a concrete
//! provider. [`crate::gemini::GeminiProvider`] talks to Google's API; tests
//! substitute scripted fakes.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from a single generation attempt against one model
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("prompt blocked by provider: {0}")]
    Blocked(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Sampling parameters sent with every attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// Something that can turn a prompt into text using a named model.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Generate text for `prompt` on `model`.
    ///
    /// Returning `Ok` with blank text is allowed; the caller decides what
    /// counts as a usable answer.
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;
}
