//! Process configuration, read once from the environment at startup.
//!
//! Required variables are checked up front so that a missing value stops
//! the process before it binds a socket.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::agent::DEFAULT_AGENT_ENDPOINT;
use crate::llm::LlmConfig;
use crate::relay::{BotIdentity, DEFAULT_BOT_AVATAR_URL, DEFAULT_BOT_NAME};
use crate::upload::UploadConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Logging settings shared by every binary
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit newline-delimited JSON
    pub json: bool,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            level: lookup("RELAY_LOG").unwrap_or_else(|| "info".to_string()),
            json: lookup("RELAY_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Install the global subscriber. `RUST_LOG` wins over `RELAY_LOG`.
    pub fn init_tracing(&self) {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| self.level.parse::<tracing_subscriber::EnvFilter>())
            .unwrap_or_else(|e| {
                eprintln!(
                    "WARN: RELAY_LOG='{}' is not a valid tracing filter ({}); falling back to 'info'",
                    self.level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            });

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true);

        if self.json {
            subscriber.json().init();
        } else {
            subscriber.init();
        }
    }
}

/// Everything the relay server needs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub db_pool_size: usize,
    pub llm: LlmConfig,
    pub bot: BotIdentity,
    pub uploads: UploadConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database_url = required("DATABASE_URL")?;
        let llm_url = required("LLM_API_URL")?;
        let llm_key = required("LLM_API_KEY")?;
        let workspace = required("LLM_WORKSPACE_ID")?;

        let bind_address = get("RELAY_BIND")
            .unwrap_or_else(|| "127.0.0.1:3030".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "RELAY_BIND",
                reason: e.to_string(),
            })?;

        let db_pool_size = match get("RELAY_DB_POOL_SIZE") {
            Some(v) => v.parse::<usize>().ok().filter(|n| *n > 0).ok_or(ConfigError::Invalid {
                key: "RELAY_DB_POOL_SIZE",
                reason: format!("'{}' is not a positive integer", v),
            })?,
            None => 16,
        };

        let mut llm = LlmConfig::new(llm_url, llm_key, workspace);
        if let Some(session_id) = get("LLM_SESSION_ID") {
            llm = llm.with_session_id(session_id);
        }
        if let Some(mode) = get("LLM_MODE") {
            llm = llm.with_mode(mode);
        }

        let bot = BotIdentity {
            name: get("BOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            avatar_url: get("BOT_AVATAR_URL").unwrap_or_else(|| DEFAULT_BOT_AVATAR_URL.to_string()),
            ..BotIdentity::default()
        };

        let uploads = match get("UPLOAD_DIR") {
            Some(dir) => UploadConfig::new(PathBuf::from(dir)),
            None => UploadConfig::default(),
        };

        Ok(Self {
            bind_address,
            database_url,
            db_pool_size,
            llm,
            bot,
            uploads,
        })
    }
}

/// Settings for the terminal agent client
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: String,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup("AGENT_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AGENT_ENDPOINT.to_string()),
        }
    }
}
