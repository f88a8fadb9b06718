//! Client for the summary endpoint, as used by the admin frontend and the CLI.

use crate::summary::{Language, SummaryRequest, SummaryResponse};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default timeout for the whole fallback chain, seen from the caller
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No text to summarize")]
    EmptyText,
    #[error("Connection to the server failed: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("Server response is not JSON")]
    InvalidJson,
    #[error("{0}")]
    Api(ApiFailure),
    #[error("Invalid response from server")]
    InvalidResponse,
}

/// Error body returned by the server for a failed request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub tried_models: Vec<String>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.error.as_deref().unwrap_or("Failed to generate summary")
        )?;
        if let Some(solution) = &self.solution {
            write!(f, "\n\n{}", solution)?;
        }
        Ok(())
    }
}

/// HTTP client for `POST /api/ai/summarize`
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    base_url: String,
}

impl SummaryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/ai/summarize", self.base_url)
    }

    /// Request a summary from the server
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, ClientError> {
        if request.text.trim().is_empty() {
            return Err(ClientError::EmptyText);
        }

        debug!(url = %self.endpoint(), "Calling summarize API");
        let response = self
            .client
            .post(self.endpoint())
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        let data: serde_json::Value =
            serde_json::from_str(&raw).map_err(|_| ClientError::InvalidJson)?;

        if !status.is_success() {
            let failure: ApiFailure = serde_json::from_value(data).unwrap_or_default();
            return Err(ClientError::Api(failure));
        }

        match serde_json::from_value::<SummaryResponse>(data) {
            Ok(summary) if summary.success && !summary.summary.is_empty() => {
                info!(model = %summary.model, length = summary.length, "Summary received");
                Ok(summary)
            }
            _ => Err(ClientError::InvalidResponse),
        }
    }

    /// Send a small test request and report whether the server can summarize
    pub async fn check_connection(&self) -> bool {
        let sample = SummaryRequest::new("Test book: A story about testing")
            .with_length(50, 100)
            .with_language(Language::English);

        match self.summarize(&sample).await {
            Ok(_) => true,
            Err(e) => {
                info!(error = %e, "Connection check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_with_solution() {
        let failure = ApiFailure {
            error: Some("all models failed".to_string()),
            solution: Some("Generate a new key".to_string()),
            tried_models: vec!["a".to_string()],
        };
        assert_eq!(
            ClientError::Api(failure).to_string(),
            "all models failed\n\nGenerate a new key"
        );
    }

    #[test]
    fn test_failure_display_without_error() {
        let failure = ApiFailure::default();
        assert_eq!(failure.to_string(), "Failed to generate summary");
    }

    #[tokio::test]
    async fn test_blank_text_fails_locally() {
        // Nothing listens on port 9; a network call would surface as Connection
        let client = SummaryClient::new("http://127.0.0.1:9").unwrap();
        let err = client.summarize(&SummaryRequest::new("  ")).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyText));
    }
}
