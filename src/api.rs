//! HTTP API for the summary service.
//!
//! Provides:
//! - `POST /api/ai/summarize` for book summaries
//! - `GET /health` for liveness and configuration status

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agent::{SummarizeError, Summarizer, EXHAUSTED_SOLUTION, MISSING_KEY_SOLUTION};
use crate::summary::{SummarizeBody, SummaryRequest, SummaryResponse};

/// Shared state for API handlers.
pub struct ApiState {
    /// The summarization agent.
    pub summarizer: Summarizer,
}

impl ApiState {
    pub fn new(summarizer: Summarizer) -> Self {
        Self { summarizer }
    }
}

/// Build the API router with all routes.
pub fn router(state: Arc<ApiState>) -> Router {
    // The admin frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/ai/summarize", post(summarize))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether a provider credential is configured.
    pub configured: bool,
    /// Models in fallback order.
    pub models: Vec<String>,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        configured: state.summarizer.is_configured(),
        models: state.summarizer.models().to_vec(),
    })
}

/// Summarize endpoint.
///
/// The body is parsed by hand so a body that is not JSON surfaces as the
/// documented `{ error, code, details }` shape instead of axum's plain-text
/// rejection. Well-formed JSON with bad fields is a 400.
pub async fn summarize(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Json<SummaryResponse>, ApiError> {
    let body: SummarizeBody = serde_json::from_slice(&body).map_err(|e| {
        if e.is_data() {
            SummarizeError::InvalidRequest(format!("Invalid request body: {}", e))
        } else {
            SummarizeError::unexpected(e.to_string(), "INVALID_JSON")
        }
    })?;

    let request = SummaryRequest::from_body(body);
    let summary = state.summarizer.summarize(&request).await?;

    Ok(Json(summary.into()))
}

/// Error response for the summary endpoint
#[derive(Debug)]
pub struct ApiError(pub SummarizeError);

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        let error = self.0.to_string();
        match &self.0 {
            SummarizeError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            SummarizeError::MissingConfiguration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": error,
                    "solution": MISSING_KEY_SOLUTION,
                }),
            ),
            SummarizeError::AllModelsExhausted { tried_models } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": error,
                    "solution": EXHAUSTED_SOLUTION,
                    "triedModels": tried_models,
                }),
            ),
            SummarizeError::Unexpected { code, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": error,
                    "code": code,
                    "details": "Check server logs for full error",
                }),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SummarizeError::InvalidRequest(_) => {
                tracing::debug!(error = %self.0, "Rejected summarize request")
            }
            _ => tracing::error!(error = %self.0, "Summarize request failed"),
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
