//! Transport seam between the session and the remote agent

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use super::error::AgentError;
use super::types::{AgentRequest, AgentResponse};

pub const DEFAULT_AGENT_ENDPOINT: &str = "http://localhost:8000/api/v1/agent/ask_agent";

/// Sends one query and waits for the agent's reply
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn ask(&self, query: &str) -> Result<AgentResponse, AgentError>;
}

#[async_trait]
impl<T: AgentTransport + ?Sized> AgentTransport for Arc<T> {
    async fn ask(&self, query: &str) -> Result<AgentResponse, AgentError> {
        (**self).ask(query).await
    }
}

/// JSON-over-HTTP agent client
#[derive(Clone)]
pub struct HttpAgentTransport {
    http_client: Client,
    endpoint: String,
}

impl HttpAgentTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AgentError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AgentError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentTransport for HttpAgentTransport {
    async fn ask(&self, query: &str) -> Result<AgentResponse, AgentError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AgentRequest { user_query: query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Http {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        Ok(response.json::<AgentResponse>().await?)
    }
}
