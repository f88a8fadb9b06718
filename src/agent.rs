//! Summarization agent with model fallback.
//!
//! Walks an ordered list of models and returns the first non-empty answer.
//! Per-model failures are logged and absorbed; only the terminal outcome
//! reaches the caller.

pub use crate::summary::{Summary, SummaryRequest};

use crate::config::Config;
use crate::prompt::build_prompt;
use crate::provider::{GenerationParams, TextGenerator};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Remediation hint returned when every model fails
pub const EXHAUSTED_SOLUTION: &str = "Generate a NEW API key at https://aistudio.google.com/app/apikey and choose 'Create API key in new project'";

/// Remediation hint returned when no credential is configured
pub const MISSING_KEY_SOLUTION: &str = "Set GEMINI_API_KEY in .env and restart the server";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("API key is not configured on the server")]
    MissingConfiguration,
    #[error("all models failed")]
    AllModelsExhausted { tried_models: Vec<String> },
    #[error("{message}")]
    Unexpected { message: String, code: String },
}

impl SummarizeError {
    pub fn unexpected(message: impl Into<String>, code: impl Into<String>) -> Self {
        SummarizeError::Unexpected {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Runs summarization requests against a fallback chain of models.
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    api_key: Option<String>,
    models: Vec<String>,
    params: GenerationParams,
}

impl Summarizer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        api_key: Option<String>,
        models: Vec<String>,
    ) -> Self {
        Self {
            generator,
            api_key,
            models,
            params: GenerationParams::default(),
        }
    }

    /// Build a summarizer from loaded configuration
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self::new(
            generator,
            config.api_key().map(str::to_string),
            config.agent.models.clone(),
        )
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Summarize `request`, trying each configured model in order
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, SummarizeError> {
        validate(request)?;

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingConfiguration)?;

        let prompt = build_prompt(request);
        info!(
            chars = request.text.chars().count(),
            language = request.language.code(),
            "Starting summarization"
        );

        for model in &self.models {
            info!(model = %model, "Trying model");

            match self
                .generator
                .generate(api_key, model, &prompt, &self.params)
                .await
            {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        warn!(model = %model, "Model returned empty text");
                        continue;
                    }
                    info!(model = %model, "Summary generated");
                    return Ok(Summary::new(text.to_string(), model.clone()));
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Model failed");
                }
            }
        }

        debug!(tried = ?self.models, "Fallback chain exhausted");
        Err(SummarizeError::AllModelsExhausted {
            tried_models: self.models.clone(),
        })
    }
}

fn validate(request: &SummaryRequest) -> Result<(), SummarizeError> {
    if request.text.trim().is_empty() {
        return Err(SummarizeError::InvalidRequest(
            "No text to summarize".to_string(),
        ));
    }
    if request.max_length < request.min_length {
        return Err(SummarizeError::InvalidRequest(format!(
            "maxLength ({}) must not be less than minLength ({})",
            request.max_length, request.min_length
        )));
    }
    Ok(())
}
