//! LLM client layer
//!
//! The relay talks to a single AnythingLLM-style workspace through the
//! [`LlmProvider`] trait; failures are turned into fixed fallback replies by
//! [`reply_or_fallback`].

pub mod anything;
pub mod config;
pub mod error;
pub mod provider;

// Re-export commonly used types
pub use anything::{AnythingLlmClient, NO_RESPONSE_TEXT};
pub use config::LlmConfig;
pub use error::{LlmError, LLM_ERROR_TEXT, LLM_UNAVAILABLE_TEXT};
pub use provider::{reply_or_fallback, LlmProvider};
