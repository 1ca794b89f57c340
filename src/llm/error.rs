//! Error types for the LLM layer

use thiserror::Error;

/// Reply text stored when the LLM answers with a non-success status
pub const LLM_ERROR_TEXT: &str = "Error from LLM";

/// Reply text stored when the LLM could not be reached or understood
pub const LLM_UNAVAILABLE_TEXT: &str = "LLM service unavailable.";

/// Errors that can occur when calling the LLM workspace API
#[derive(Debug, Error)]
pub enum LlmError {
    /// The endpoint answered with a non-success status
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// The request could not be completed (connect, timeout, body read)
    #[error("Transport error: {0}")]
    TransportError(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid client parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Text recorded as the bot reply in place of a real answer
    pub fn fallback_text(&self) -> &'static str {
        match self {
            LlmError::HttpError { .. } => LLM_ERROR_TEXT,
            _ => LLM_UNAVAILABLE_TEXT,
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::SerializationError(err.to_string())
        } else {
            LlmError::TransportError(err.to_string())
        }
    }
}
