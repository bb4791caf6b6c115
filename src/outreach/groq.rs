//! Groq chat completions, the fallback provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::outreach::prompt::Prompt;
use crate::outreach::provider::{ProviderError, TextProvider};

const MAX_TOKENS: u32 = 512;

pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GroqClient {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TextProvider for GroqClient {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn available(&self) -> bool {
        if self.api_key.is_none() {
            tracing::error!("GROQ_API_KEY not found in environment variables or .env file");
        }
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &Prompt, temperature: f32) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("GROQ_API_KEY".to_string()))?;

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "temperature": temperature,
            "max_tokens": MAX_TOKENS,
            "top_p": 1,
            "stream": false
        });

        let response = self
            .client
            .post(format!("{}/openai/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let json: Value = response.json().await?;
        completion_content(&json)
    }
}

fn completion_content(json: &Value) -> Result<String, ProviderError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| ProviderError::Response("no content in Groq response".to_string()))
}
