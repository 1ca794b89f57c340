// Data structures (ChatMessage, request/response bodies)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// Side of the conversation a message renders on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Start,
    End,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Start => "start",
            Position::End => "end",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Position::Start),
            "end" => Ok(Position::End),
            other => Err(format!("unknown position '{}'", other)),
        }
    }
}

/// A stored chat message. Immutable once the store has assigned `id` and `time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
    pub content: String,
    pub position: Position,
    pub time: DateTime<Utc>,
}

/// Write-side message, before the store assigns identity and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub name: String,
    pub avatar_url: String,
    pub content: String,
    pub position: Position,
}

impl NewChatMessage {
    pub fn new(
        name: impl Into<String>,
        avatar_url: impl Into<String>,
        content: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            name: name.into(),
            avatar_url: avatar_url.into(),
            content: content.into(),
            position,
        }
    }
}

// Request Types

/// Body of `POST /messages`. Every field is optional here so that missing
/// and wrongly-typed fields can be reported the same way by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl SendMessageRequest {
    /// Parse a `POST /messages` body. Only a JSON object is accepted; a
    /// positional array is rejected even though it would deserialize.
    pub fn from_json(body: &[u8]) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("request body is not a JSON object".to_string());
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Check that all four fields are present and non-empty and that the
    /// position is one of the two known markers.
    pub fn validate(self) -> Result<NewChatMessage, String> {
        fn required(field: &str, value: Option<String>) -> Result<String, String> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(format!("missing field '{}'", field)),
            }
        }

        let name = required("name", self.name)?;
        let avatar_url = required("avatarUrl", self.avatar_url)?;
        let content = required("content", self.content)?;
        let position = required("position", self.position)?.parse::<Position>()?;

        Ok(NewChatMessage {
            name,
            avatar_url,
            content,
            position,
        })
    }
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePair {
    pub user_message: ChatMessage,
    pub llm_message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
