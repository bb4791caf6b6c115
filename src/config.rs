//! Configuration module for environment variables and application settings

use std::env;
use std::path::PathBuf;

const DEFAULT_USER_NAME: &str = "delegateAffairsManager";
const DEFAULT_USER_PASSWORD: &str = "GDSFTW";
const DEFAULT_SECRET_KEY: &str = "GDS-LUCKNOW-MUN-2025-SECRET-KEY";

#[derive(Debug, Clone)]
pub struct Config {
    /// Operator login
    pub auth: AuthConfig,

    /// Path of the delegate tracking CSV
    pub delegates_csv: PathBuf,

    /// Server configuration
    pub server: ServerConfig,

    /// Text generation providers
    pub providers: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub secret_key: String,
    /// Lifetime of a token issued without "remember me"
    pub session_ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub ollama_url: String,
    pub ollama_model: String,
    /// Groq is unavailable when no key is configured
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let auth = AuthConfig {
            username: env::var("USER_NAME").unwrap_or_else(|_| DEFAULT_USER_NAME.to_string()),
            password: env::var("USER_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_USER_PASSWORD.to_string()),
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
        };

        Self {
            auth,

            delegates_csv: env::var("DELEGATES_CSV")
                .unwrap_or_else(|_| "delegates.csv".to_string())
                .into(),

            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },

            providers: ProviderConfig {
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "gemma3:4b".to_string()),
                groq_api_key: env::var("GROQ_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                groq_model: env::var("GROQ_MODEL")
                    .unwrap_or_else(|_| "meta-llama/llama-4-scout-17b-16e-instruct".to_string()),
                groq_url: env::var("GROQ_URL")
                    .unwrap_or_else(|_| "https://api.groq.com".to_string()),
                timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
        }
    }

    /// Warn about settings still on their built-in defaults.
    pub fn log_insecure_defaults(&self) {
        if self.auth.password == DEFAULT_USER_PASSWORD {
            tracing::warn!("USER_PASSWORD not set, using the built-in default password");
        }
        if self.auth.secret_key == DEFAULT_SECRET_KEY {
            tracing::warn!("SECRET_KEY not set, tokens are signed with the built-in default key");
        }
        if self.providers.groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY not set, the fallback provider is unavailable");
        }
    }
}
