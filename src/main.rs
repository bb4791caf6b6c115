//! # GDS Delegate Affairs Server
//!
//! Internal tool for the Global Diplomatic Summit-Lucknow MUN 2025 organizing
//! committee, built with Rust, Axum, and Tokio.
//!
//! ## Features
//! - Operator login with signed, expiring session tokens
//! - Outreach email template and LLM-personalized invitations
//!   (local Ollama first, Groq as fallback)
//! - Delegate contact tracking in a CSV file with search, inline editing
//!   and export
//! - Structured logging with tracing
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Router and application state
//! - `config`: Environment variable configuration management
//! - `auth`: Credentials, session tokens and the session extractor
//! - `outreach`: Prompt building and the provider fallback chain
//! - `delegates`: Delegate records and the CSV store
//! - `routes`: HTTP route handlers organized by screen
//! - `views`: HTML rendering
//!
//! ## Environment Setup
//! Copy `.env.example` to `.env` and configure:
//! ```bash
//! cp .env.example .env
//! # Edit .env with your credentials and API keys
//! ```
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server will start on `http://127.0.0.1:3000` by default.

mod auth;
mod config;
mod delegates;
mod error;
mod outreach;
mod routes;
mod server;
mod views;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    let _ = dotenv::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting Delegate Affairs Server...");
    tracing::info!("📦 Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("🏗️  Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    let config = Config::from_env();
    config.log_insecure_defaults();

    if let Err(e) = server::start(config).await {
        tracing::error!(error = %e, "Server stopped with an error");
        return Err(e);
    }
    Ok(())
}
