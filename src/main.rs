//! DigiLibZ AI CLI - book summary service
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use digilibz::{
    api::{self, ApiState},
    client::SummaryClient,
    gemini::GeminiProvider,
    Config, Language, Summarizer, SummaryRequest,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "digilibz")]
#[command(author, version, about = "Book summary service for the DigiLibZ library admin", long_about = None)]
struct Cli {
    /// Path to a config file, instead of the standard locations
    #[arg(long, global = true, env = "DIGILIBZ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long, env = "DIGILIBZ_BIND")]
        bind: Option<String>,
    },
    /// Summarise a book description
    Summarise {
        /// Text to summarise; read from stdin or $EDITOR when omitted
        text: Option<String>,
        /// Minimum summary length in characters
        #[arg(long, default_value_t = digilibz::summary::DEFAULT_MIN_LENGTH)]
        min: u32,
        /// Maximum summary length in characters
        #[arg(long, default_value_t = digilibz::summary::DEFAULT_MAX_LENGTH)]
        max: u32,
        /// Output language: "id" or "en"
        #[arg(long, default_value = "id")]
        language: String,
        /// Summary API URL
        #[arg(long, env = "DIGILIBZ_API_URL", default_value = "http://localhost:3000")]
        api_url: String,
        /// Call Gemini directly instead of going through the server
        #[arg(long)]
        direct: bool,
    },
    /// Check that the summary API can produce a summary
    Check {
        /// Summary API URL
        #[arg(long, env = "DIGILIBZ_API_URL", default_value = "http://localhost:3000")]
        api_url: String,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "digilibz=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Serve { bind } => {
            let config = load_config(config_path.as_deref())?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            run_server(&config, &bind).await?;
        }
        Commands::Summarise {
            text,
            min,
            max,
            language,
            api_url,
            direct,
        } => {
            let text = read_text(text)?;
            let request = SummaryRequest::new(text)
                .with_length(min, max)
                .with_language(Language::from(language.as_str()));

            let (summary, model, length) = if direct {
                let config = load_config(config_path.as_deref())?;
                let summarizer = build_summarizer(&config)?;
                let summary = summarizer.summarize(&request).await?;
                (summary.text, summary.model, summary.length)
            } else {
                let client = SummaryClient::new(api_url)?;
                let response = client.summarize(&request).await?;
                (response.summary, response.model, response.length)
            };

            println!("{}\n", summary);
            println!(
                "{}",
                format!("Model: {}, length: {} characters", model, length).dimmed()
            );
        }
        Commands::Check { api_url } => {
            let client = SummaryClient::new(api_url.clone())?;
            if client.check_connection().await {
                println!("{} {}", "✓".green(), format!("Summary API at {} is working", api_url));
            } else {
                println!("{} {}", "✗".red(), format!("Summary API at {} failed", api_url));
                std::process::exit(1);
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "digilibz", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

fn build_summarizer(config: &Config) -> anyhow::Result<Summarizer> {
    let provider = GeminiProvider::new(config.provider.base_url.clone(), config.request_timeout())?;
    Ok(Summarizer::from_config(Arc::new(provider), config))
}

/// Run the API server until interrupted.
async fn run_server(config: &Config, bind: &str) -> anyhow::Result<()> {
    let summarizer = build_summarizer(config)?;
    if !summarizer.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; summarize requests will fail until it is");
    }
    tracing::info!(models = ?summarizer.models(), "Summarizer ready");

    let state = Arc::new(ApiState::new(summarizer));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    tracing::info!(addr = %bind, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

/// Take text from the argument, piped stdin, or the user's editor
fn read_text(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    let text = edit::edit("").context("failed to open editor")?;
    Ok(text)
}
