//! AnythingLLM workspace chat client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{config::LlmConfig, error::LlmError, provider::LlmProvider};

/// Reply text stored when the LLM answered but sent no text
pub const NO_RESPONSE_TEXT: &str = "No response from LLM";

/// Request body of the workspace chat endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceChatRequest<'a> {
    pub message: &'a str,
    pub mode: &'a str,
    pub session_id: &'a str,
    pub reset: bool,
}

/// The part of the workspace chat response the relay reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceChatResponse {
    #[serde(default)]
    pub text_response: Option<String>,
}

impl WorkspaceChatResponse {
    /// The reply text, or the placeholder when the field is missing or empty
    pub fn into_text(self) -> String {
        self.text_response
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
    }
}

/// Client for one LLM workspace
#[derive(Clone)]
pub struct AnythingLlmClient {
    /// HTTP client for making requests
    http_client: Client,
    config: LlmConfig,
}

impl AnythingLlmClient {
    /// Create a new client
    ///
    /// Only the connect phase has a timeout; a slow answer is waited for.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.base_url.is_empty() || config.workspace_id.is_empty() {
            return Err(LlmError::InvalidRequest(
                "LLM base URL and workspace id are required".to_string(),
            ));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for AnythingLlmClient {
    async fn chat(&self, message: &str) -> Result<String, LlmError> {
        let body = WorkspaceChatRequest {
            message,
            mode: &self.config.mode,
            session_id: &self.config.session_id,
            reset: false,
        };

        let url = self.config.chat_url();
        tracing::debug!(%url, "querying LLM workspace");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        // Check status
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "LLM returned an error status");
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WorkspaceChatResponse = response.json().await?;
        Ok(parsed.into_text())
    }
}
