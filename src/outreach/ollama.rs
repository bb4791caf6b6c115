//! Local Ollama server, the primary provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::outreach::prompt::Prompt;
use crate::outreach::provider::{ProviderError, TextProvider};

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Model name without its tag, e.g. `gemma3` for `gemma3:4b`
    fn base_model(&self) -> &str {
        self.model.split(':').next().unwrap_or(&self.model)
    }

    async fn installed_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let json: Value = response.json().await?;
        Ok(model_names(&json))
    }
}

#[async_trait]
impl TextProvider for OllamaClient {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    /// The server must answer and have the configured model (any tag) pulled
    async fn available(&self) -> bool {
        match self.installed_models().await {
            Ok(models) => {
                if has_model(&models, self.base_model()) {
                    info!(model = %self.model, "Ollama is available");
                    true
                } else {
                    warn!(model = %self.model, available = ?models, "Ollama is running but the model is not installed");
                    false
                }
            }
            Err(e) => {
                warn!(error = %e, "Ollama check failed, it might not be running or reachable");
                false
            }
        }
    }

    async fn generate(&self, prompt: &Prompt, temperature: f32) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "stream": false,
            "options": { "temperature": temperature }
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let json: Value = response.json().await?;
        chat_content(&json)
    }
}

/// Names listed by `GET /api/tags`
fn model_names(json: &Value) -> Vec<String> {
    json["models"]
        .as_array()
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn has_model(installed: &[String], base_model: &str) -> bool {
    installed
        .iter()
        .map(|name| name.split(':').next().unwrap_or(name))
        .any(|name| name.contains(base_model))
}

fn chat_content(json: &Value) -> Result<String, ProviderError> {
    json["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| ProviderError::Response("no message content in Ollama response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_lookup_ignores_tags() {
        let tags = json!({
            "models": [
                { "name": "llama3.2:latest" },
                { "name": "gemma3:12b" }
            ]
        });
        let names = model_names(&tags);
        assert_eq!(names, vec!["llama3.2:latest", "gemma3:12b"]);
        assert!(has_model(&names, "gemma3"));
        assert!(!has_model(&names, "mistral"));
        assert!(model_names(&json!({})).is_empty());
    }

    #[test]
    fn test_base_model() {
        let client = OllamaClient::new("http://localhost:11434/", "gemma3:4b", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_model(), "gemma3");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_chat_content() {
        let response = json!({ "message": { "role": "assistant", "content": "Dear Alex" } });
        assert_eq!(chat_content(&response).unwrap(), "Dear Alex");
        assert!(chat_content(&json!({ "error": "model not found" })).is_err());
    }
}
