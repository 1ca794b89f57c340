use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    models::{ChatMessage, NewChatMessage},
    store::{
        error::{Result, StoreError},
        MessageStore,
    },
};

/// Process-local message store, used by tests and local runs without a database
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages written so far
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert_message(&self, msg: NewChatMessage) -> Result<ChatMessage> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| StoreError::DatabaseError("message store lock poisoned".to_string()))?;

        // Never hand out a timestamp older than the latest write
        let now = Utc::now();
        let time = messages.last().map_or(now, |last| last.time.max(now));

        let stored = ChatMessage {
            id: Uuid::new_v4(),
            name: msg.name,
            avatar_url: msg.avatar_url,
            content: msg.content,
            position: msg.position,
            time,
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_messages(&self) -> Result<Vec<ChatMessage>> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| StoreError::DatabaseError("message store lock poisoned".to_string()))?
            .clone();

        // Stable sort keeps insertion order for equal timestamps
        messages.sort_by_key(|m| m.time);
        Ok(messages)
    }
}
