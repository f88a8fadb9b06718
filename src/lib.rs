//! # DigiLibZ AI
//!
//! Book summary service for the DigiLibZ library admin.
//!
//! ## Features
//!
//! - **Model fallback**: tries an ordered list of Gemini models until one answers
//! - **Bilingual prompts**: Indonesian or English summaries within a length band
//! - **HTTP API**: `POST /api/ai/summarize` served with axum
//! - **Client**: calls the endpoint and checks connectivity

pub mod agent;
pub mod api;
pub mod client;
pub mod config;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod summary;

pub use agent::{SummarizeError, Summarizer};
pub use config::Config;
pub use summary::{Language, Summary, SummaryRequest};
