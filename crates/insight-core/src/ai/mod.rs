//! External AI collaborator.
//!
//! The scoring core treats the language model as an opaque completion
//! function: a prompt goes in, text or an error comes out. Callers that wrap
//! it (the AI classifier and action generator) own the fallback behaviour.

pub mod anthropic;
pub mod prompt;

use anyhow::Result;
use async_trait::async_trait;

pub use anthropic::AnthropicClient;

/// A text completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete a prompt, returning the raw text reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for std::sync::Arc<T> {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        (**self).complete(prompt, max_tokens).await
    }
}

/// Extract JSON from a string that might be wrapped in markdown code blocks.
pub fn extract_json(text: &str) -> String {
    let trimmed = text.trim();

    // Try to find JSON within ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    // Try to find JSON within ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    // Try to find the first { and last } for a JSON object
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}
