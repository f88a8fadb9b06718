//! Gemini `generateContent` client.
//!
//! Uses reqwest against the public REST endpoint rather than an SDK so that
//! sampling parameters and model names pass through untouched.

use crate::provider::{GenerationParams, ProviderError, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// User-Agent sent to the provider
const USER_AGENT: &str = concat!("digilibz/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationParams,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::Blocked(reason));
        }

        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}

/// Gemini provider speaking the `models/{model}:generateContent` REST API
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider for `base_url` with a per-call timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: params,
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<String, ProviderError> {
        serde_json::from_str::<GenerateContentResponse>(raw)
            .unwrap()
            .into_text()
    }

    #[test]
    fn test_joins_candidate_parts() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse(raw).unwrap(), "Hello world");
    }

    #[test]
    fn test_no_candidates_is_empty_text() {
        assert_eq!(parse("{}").unwrap(), "");
        assert_eq!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(), "");
    }

    #[test]
    fn test_block_reason_is_an_error() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert!(matches!(parse(raw), Err(ProviderError::Blocked(reason)) if reason == "SAFETY"));
    }

    #[test]
    fn test_request_body_shape() {
        let params = GenerationParams::default();
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "prompt" }],
            }],
            generation_config: &params,
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new("http://localhost:9/v1beta/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            provider.endpoint("gemini-1.5-flash"),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
