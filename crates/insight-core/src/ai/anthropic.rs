//! Claude Messages API client.
//!
//! Sends a single user message and joins the text blocks of the reply.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::CompletionService;
use crate::config::AiConfig;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for calling the Claude API.
pub struct AnthropicClient {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

impl AnthropicClient {
    /// Create a new client with the given API key and model.
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Self::with_options(api_key, model, ANTHROPIC_API_URL, Duration::from_secs(120))
    }

    /// Create a client with a custom endpoint and request timeout.
    pub fn with_options(api_key: &str, model: &str, api_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_url: api_url.to_string(),
            client,
        })
    }

    /// Build a client from configuration. Fails when no API key is set.
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let api_key = config.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow::anyhow!(
                "ANTHROPIC_API_KEY environment variable not set.\n\
                 Set it with: export ANTHROPIC_API_KEY=your-key"
            )
        })?;

        Self::with_options(
            api_key,
            &config.model,
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for AnthropicClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, max_tokens, "Calling Claude API");
        let api_response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to call Claude API")?;

        let api_status = api_response.status();
        if !api_status.is_success() {
            let error_text = api_response.text().await.unwrap_or_default();
            anyhow::bail!("Claude API error (HTTP {}): {}", api_status, error_text);
        }

        let response_body: MessagesResponse = api_response
            .json()
            .await
            .context("Failed to parse Claude API response")?;

        let text = response_body
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            anyhow::bail!("No text content in Claude API response");
        }

        debug!(chars = text.len(), "Claude API replied");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let config = AiConfig {
            api_key: Some(String::new()),
            ..AiConfig::default()
        };
        let err = AnthropicClient::from_config(&config).err().expect("missing key is an error");
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_from_config_carries_settings() {
        let config = AiConfig {
            api_key: Some("sk-test".to_string()),
            model: "claude-3-5-sonnet-latest".to_string(),
            timeout_secs: 5,
            ..AiConfig::default()
        };
        let client = AnthropicClient::from_config(&config).expect("client builds");
        assert_eq!(client.model(), "claude-3-5-sonnet-latest");
        assert_eq!(client.api_url, ANTHROPIC_API_URL);
    }

    #[test]
    fn test_with_options_builds_client() {
        let client = AnthropicClient::with_options(
            "sk-test",
            "m",
            "http://localhost:9/v1/messages",
            Duration::from_secs(1),
        )
        .expect("client builds");
        assert_eq!(client.model(), "m");
    }
}
