//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::error::LlmError;

/// Interface the relay uses to obtain a reply for a message
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one message and wait for the complete (non-streaming) reply text
    async fn chat(&self, message: &str) -> Result<String, LlmError>;
}

/// Ask the provider for a reply, substituting the fixed fallback text when
/// the call fails. Never returns an error.
pub async fn reply_or_fallback(provider: &dyn LlmProvider, message: &str) -> String {
    match provider.chat(message).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "LLM call failed; storing fallback reply");
            e.fallback_text().to_string()
        }
    }
}
