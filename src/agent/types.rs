//! Conversation and wire types for the agent proxy

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::upload::UploadedFile;

/// Attachments reuse the reference returned by the upload endpoint
pub type Attachment = UploadedFile;

/// Who a conversation turn belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One entry of the in-memory conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            attachments: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}

/// Body posted to the agent endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AgentRequest<'a> {
    pub user_query: &'a str,
}

/// Agent endpoint reply. Only `answer` drives the conversation; the other
/// fields are kept for callers that want to show provenance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub semantic_query: Option<String>,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

/// Informational or error message surfaced to the user, outside the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Cancelled,
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Cancelled => "Request cancelled",
            Notice::Error(message) => message,
        }
    }
}
