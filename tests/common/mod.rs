//! Shared test helpers: a scripted text generator and router builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::Router;
use digilibz::api::{self, ApiState};
use digilibz::provider::{GenerationParams, ProviderError, TextGenerator};
use digilibz::Summarizer;

static INIT: Once = Once::new();

/// Initialize environment variables from `.env` file (once).
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

/// Scripted outcome for one model
#[derive(Clone)]
pub enum Outcome {
    Text(&'static str),
    Fail(&'static str),
}

/// Generator whose answers are fixed per model name.
///
/// Models without a script fail as if the provider did not know them.
#[derive(Default)]
pub struct FakeGenerator {
    script: HashMap<String, Outcome>,
    calls: AtomicUsize,
    models: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new(script: &[(&str, Outcome)]) -> Arc<Self> {
        Arc::new(Self {
            script: script
                .iter()
                .map(|(model, outcome)| (model.to_string(), outcome.clone()))
                .collect(),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn attempted(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(
        &self,
        _api_key: &str,
        model: &str,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.script.get(model) {
            Some(Outcome::Text(text)) => Ok(text.to_string()),
            Some(Outcome::Fail(message)) => Err(ProviderError::Api {
                status: 429,
                message: message.to_string(),
            }),
            None => Err(ProviderError::Api {
                status: 404,
                message: format!("models/{} is not found", model),
            }),
        }
    }
}

pub fn models(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Router backed by `generator`, with or without a credential
pub fn app(generator: Arc<FakeGenerator>, api_key: Option<&str>, names: &[&str]) -> Router {
    let summarizer = Summarizer::new(generator, api_key.map(str::to_string), models(names));
    api::router(Arc::new(ApiState::new(summarizer)))
}

/// Serve `router` on an ephemeral local port and return its address
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
