//! Error types for the agent proxy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent answered with a non-success status
    #[error("Error: {reason}")]
    Http { status: u16, reason: String },

    /// The request could not be completed
    #[error("{0}")]
    Transport(String),

    /// The reply was not the expected JSON
    #[error("Invalid agent response: {0}")]
    Serialization(String),

    /// Aborted by the user; informational rather than a failure
    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AgentError::Serialization(err.to_string())
        } else {
            AgentError::Transport(err.to_string())
        }
    }
}
