use async_trait::async_trait;
use thiserror::Error;

use crate::outreach::prompt::Prompt;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected provider response: {0}")]
    Response(String),
    #[error("provider is not configured: {0}")]
    NotConfigured(String),
}

/// A text generation backend used to personalize invitations
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short name used in logs and on the result page
    fn name(&self) -> &'static str;

    /// Whether the provider can be tried at all right now
    async fn available(&self) -> bool;

    async fn generate(&self, prompt: &Prompt, temperature: f32) -> Result<String, ProviderError>;
}
