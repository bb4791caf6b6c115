//! # Server Module
//!
//! HTTP server setup and route configuration for the delegate affairs server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::{CredentialStore, TokenCodec};
use crate::config::Config;
use crate::delegates::DelegateStore;
use crate::outreach::MessageGenerator;
use crate::outreach::groq::GroqClient;
use crate::outreach::ollama::OllamaClient;
use crate::routes::health::ping;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCodec>,
    pub credentials: Arc<CredentialStore>,
    /// Lifetime of tokens issued without "remember me"
    pub session_ttl: chrono::Duration,
    pub store: Arc<DelegateStore>,
    pub generator: Arc<MessageGenerator>,
}

impl AppState {
    /// Wire the production providers and store from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.providers.timeout_secs);
        let ollama = OllamaClient::new(
            &config.providers.ollama_url,
            &config.providers.ollama_model,
            timeout,
        )
        .context("Failed to create Ollama client")?;
        let groq = GroqClient::new(
            config.providers.groq_api_key.clone(),
            &config.providers.groq_url,
            &config.providers.groq_model,
            timeout,
        )
        .context("Failed to create Groq client")?;

        Ok(Self {
            tokens: Arc::new(TokenCodec::new(&config.auth.secret_key)),
            credentials: Arc::new(CredentialStore::from_config(&config.auth)),
            session_ttl: chrono::Duration::hours(config.auth.session_ttl_hours),
            store: Arc::new(DelegateStore::new(config.delegates_csv.clone())),
            generator: Arc::new(MessageGenerator::new(Arc::new(ollama), Arc::new(groq))),
        })
    }
}

/// Build the full application router (used by `start` and tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .merge(crate::routes::auth::create_auth_routes())
        .merge(crate::routes::outreach::create_outreach_routes())
        .merge(crate::routes::delegates::create_delegate_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Starts the delegate affairs HTTP server and serves until the process exits.
pub async fn start(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;

    // Create the CSV up front so the first page load finds it
    let existing = state.store.load().len();
    tracing::info!(path = %state.store.path().display(), delegates = existing, "Delegate store ready");

    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 Delegate Affairs Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/ping", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
