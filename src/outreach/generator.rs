//! Personalized message generation with a single fallback hop.
//!
//! The primary provider is tried first (if available); on unavailability,
//! error or empty output the secondary provider is tried once. There is no
//! retry loop and the two calls never run concurrently.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::outreach::prompt::{BASE_TEMPLATE, EVENT_HIGHLIGHT_MAX_CHARS, GenerationRequest, Prompt};
use crate::outreach::provider::TextProvider;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("delegate name is required")]
    MissingName,
    #[error("event highlight is limited to {} characters", EVENT_HIGHLIGHT_MAX_CHARS)]
    HighlightTooLong,
    #[error("failed to personalize message using both {primary} and {secondary}")]
    AllProvidersFailed {
        primary: &'static str,
        secondary: &'static str,
    },
}

impl GenerationError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, GenerationError::AllProvidersFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub text: String,
    /// Provider that produced the text
    pub provider: &'static str,
}

pub struct MessageGenerator {
    primary: Arc<dyn TextProvider>,
    secondary: Arc<dyn TextProvider>,
}

impl MessageGenerator {
    pub fn new(primary: Arc<dyn TextProvider>, secondary: Arc<dyn TextProvider>) -> Self {
        Self { primary, secondary }
    }

    /// The unpersonalized invitation
    pub fn base_template() -> &'static str {
        BASE_TEMPLATE
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedMessage, GenerationError> {
        let name = request.name.trim();
        if name.is_empty() {
            error!("Generation request must include at least a name");
            return Err(GenerationError::MissingName);
        }
        if request
            .event_highlight
            .as_deref()
            .is_some_and(|h| h.chars().count() > EVENT_HIGHLIGHT_MAX_CHARS)
        {
            return Err(GenerationError::HighlightTooLong);
        }

        info!(name = %name, tone = %request.tone, "Attempting to generate personalized message");
        let prompt = request.prompt();
        let temperature = request.temperature();

        if let Some(text) = attempt(self.primary.as_ref(), &prompt, temperature).await {
            info!(provider = self.primary.name(), "Personalization successful");
            return Ok(GeneratedMessage {
                text: ensure_greeting(name, &text),
                provider: self.primary.name(),
            });
        }

        info!(
            primary = self.primary.name(),
            secondary = self.secondary.name(),
            "Primary provider failed or unavailable, trying fallback"
        );
        if let Some(text) = attempt(self.secondary.as_ref(), &prompt, temperature).await {
            // Fallback output is returned as produced, without the greeting fix
            if !mentions(&text, name) {
                warn!(provider = self.secondary.name(), name = %name, "Output might be missing the name");
            }
            info!(provider = self.secondary.name(), "Personalization successful");
            return Ok(GeneratedMessage {
                text: text.trim().to_string(),
                provider: self.secondary.name(),
            });
        }

        error!(
            primary = self.primary.name(),
            secondary = self.secondary.name(),
            "Failed to personalize message using both providers"
        );
        Err(GenerationError::AllProvidersFailed {
            primary: self.primary.name(),
            secondary: self.secondary.name(),
        })
    }
}

/// One provider attempt. `None` when unavailable, failed or blank.
async fn attempt(provider: &dyn TextProvider, prompt: &Prompt, temperature: f32) -> Option<String> {
    if !provider.available().await {
        warn!(provider = provider.name(), "Provider unavailable");
        return None;
    }

    info!(provider = provider.name(), temperature, "Using provider for personalization");
    match provider.generate(prompt, temperature).await {
        Ok(text) if text.trim().is_empty() => {
            warn!(provider = provider.name(), "Provider returned an empty message");
            None
        }
        Ok(text) => Some(text),
        Err(e) => {
            error!(provider = provider.name(), error = %e, "Error during personalization");
            None
        }
    }
}

fn mentions(text: &str, name: &str) -> bool {
    text.to_lowercase().contains(&name.to_lowercase())
}

/// Prepend a greeting when the generated text never mentions the delegate
fn ensure_greeting(name: &str, text: &str) -> String {
    let text = text.trim();
    if mentions(text, name) {
        text.to_string()
    } else {
        warn!(name = %name, "Output might be missing the name, prepending a greeting");
        format!("Hi {name},\n\n{text}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::outreach::prompt::Tone;
    use crate::outreach::provider::ProviderError;

    /// Provider double replaying a fixed outcome
    pub(crate) struct ScriptedProvider {
        name: &'static str,
        available: bool,
        reply: Option<String>,
        pub(crate) calls: AtomicUsize,
        pub(crate) temperatures: std::sync::Mutex<Vec<f32>>,
    }

    impl ScriptedProvider {
        pub(crate) fn replying(name: &'static str, reply: &str) -> Self {
            Self {
                name,
                available: true,
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
                temperatures: Default::default(),
            }
        }

        pub(crate) fn failing(name: &'static str) -> Self {
            Self {
                reply: None,
                ..Self::replying(name, "")
            }
        }

        pub(crate) fn unavailable(name: &'static str) -> Self {
            Self {
                available: false,
                ..Self::replying(name, "should never be used")
            }
        }
    }

    #[async_trait]
    impl TextProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn available(&self) -> bool {
            self.available
        }

        async fn generate(&self, _prompt: &Prompt, temperature: f32) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.temperatures.lock().unwrap().push(temperature);
            self.reply
                .clone()
                .ok_or_else(|| ProviderError::Response("scripted failure".to_string()))
        }
    }

    fn chain(primary: ScriptedProvider, secondary: ScriptedProvider) -> (MessageGenerator, Arc<ScriptedProvider>, Arc<ScriptedProvider>) {
        let primary = Arc::new(primary);
        let secondary = Arc::new(secondary);
        (
            MessageGenerator::new(primary.clone(), secondary.clone()),
            primary,
            secondary,
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let (generator, _, secondary) = chain(
            ScriptedProvider::replying("Ollama", "  Dear Alex, join us!  "),
            ScriptedProvider::replying("Groq", "unused"),
        );

        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.text, "Dear Alex, join us!");
        assert_eq!(message.provider, "Ollama");
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_output_without_name_gets_greeting() {
        let (generator, _, _) = chain(
            ScriptedProvider::replying("Ollama", "Join us at GDS-Lucknow MUN 2025!"),
            ScriptedProvider::failing("Groq"),
        );

        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.text, "Hi Alex,\n\nJoin us at GDS-Lucknow MUN 2025!");
    }

    #[tokio::test]
    async fn test_name_check_ignores_case() {
        let (generator, _, _) = chain(
            ScriptedProvider::replying("Ollama", "Dear ALEX, join us!"),
            ScriptedProvider::failing("Groq"),
        );

        let message = generator.generate(&GenerationRequest::new("alex")).await.unwrap();
        assert_eq!(message.text, "Dear ALEX, join us!");
    }

    #[tokio::test]
    async fn test_failing_primary_falls_back_without_greeting_fix() {
        let (generator, primary, _) = chain(
            ScriptedProvider::failing("Ollama"),
            ScriptedProvider::replying("Groq", "Hello Alex, ..."),
        );

        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.text, "Hello Alex, ...");
        assert_eq!(message.provider, "Groq");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);

        // Secondary output missing the name is left as is
        let (generator, _, _) = chain(
            ScriptedProvider::failing("Ollama"),
            ScriptedProvider::replying("Groq", "Greetings, delegate!"),
        );
        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.text, "Greetings, delegate!");
    }

    #[tokio::test]
    async fn test_unavailable_primary_is_not_called() {
        let (generator, primary, _) = chain(
            ScriptedProvider::unavailable("Ollama"),
            ScriptedProvider::replying("Groq", "Hello Alex"),
        );

        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.provider, "Groq");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_primary_output_falls_back() {
        let (generator, _, _) = chain(
            ScriptedProvider::replying("Ollama", " \n "),
            ScriptedProvider::replying("Groq", "Hello Alex"),
        );

        let message = generator.generate(&GenerationRequest::new("Alex")).await.unwrap();
        assert_eq!(message.provider, "Groq");
    }

    #[tokio::test]
    async fn test_both_providers_failing() {
        let (generator, primary, secondary) = chain(
            ScriptedProvider::failing("Ollama"),
            ScriptedProvider::failing("Groq"),
        );

        let request = GenerationRequest::new("Priya Sharma").with_tone(Tone::Formal);
        let err = generator.generate(&request).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::AllProvidersFailed {
                primary: "Ollama",
                secondary: "Groq"
            }
        );
        assert!(!err.is_validation());
        assert_eq!(*primary.temperatures.lock().unwrap(), vec![0.4]);
        assert_eq!(*secondary.temperatures.lock().unwrap(), vec![0.4]);
    }

    #[tokio::test]
    async fn test_blank_secondary_output_is_a_failure() {
        let (generator, _, _) = chain(
            ScriptedProvider::unavailable("Ollama"),
            ScriptedProvider::replying("Groq", ""),
        );

        let err = generator.generate(&GenerationRequest::new("Alex")).await.unwrap_err();
        assert!(matches!(err, GenerationError::AllProvidersFailed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_requests_never_reach_providers() {
        let (generator, primary, secondary) = chain(
            ScriptedProvider::replying("Ollama", "Hi"),
            ScriptedProvider::replying("Groq", "Hi"),
        );

        let err = generator.generate(&GenerationRequest::new("   ")).await.unwrap_err();
        assert_eq!(err, GenerationError::MissingName);

        let mut request = GenerationRequest::new("Alex");
        request.event_highlight = Some("x".repeat(EVENT_HIGHLIGHT_MAX_CHARS + 1));
        let err = generator.generate(&request).await.unwrap_err();
        assert_eq!(err, GenerationError::HighlightTooLong);
        assert!(err.is_validation());

        assert_eq!(primary.calls.load(Ordering::SeqCst), 0);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0);
    }
}
