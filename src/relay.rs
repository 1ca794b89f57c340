//! The persist → ask → persist workflow behind `POST /messages`.
//!
//! A request moves through `received → user-persisted → llm-queried →
//! reply-persisted → responded`. A failed LLM call never aborts the request:
//! its fallback text is stored as the reply instead. The two writes are not
//! wrapped in a transaction, so a failure while storing the reply leaves the
//! user message behind without an answer.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::RelayError;
use crate::llm::{reply_or_fallback, LlmProvider};
use crate::models::{ChatMessage, MessagePair, NewChatMessage, Position, SendMessageRequest};
use crate::store::MessageStore;

pub const DEFAULT_BOT_NAME: &str = "ChatBot";
pub const DEFAULT_BOT_AVATAR_URL: &str =
    "https://img.daisyui.com/images/profile/demo/kenobee@192.webp";

/// Fixed identity used for every stored LLM reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub name: String,
    pub avatar_url: String,
    pub position: Position,
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
            avatar_url: DEFAULT_BOT_AVATAR_URL.to_string(),
            position: Position::Start,
        }
    }
}

impl BotIdentity {
    fn reply(&self, content: String) -> NewChatMessage {
        NewChatMessage {
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            content,
            position: self.position,
        }
    }
}

/// Store, LLM client and bot identity, built once at startup and shared by
/// every request.
#[derive(Clone)]
pub struct RelayService {
    store: Arc<dyn MessageStore>,
    llm: Arc<dyn LlmProvider>,
    bot: BotIdentity,
}

impl RelayService {
    pub fn new(store: Arc<dyn MessageStore>, llm: Arc<dyn LlmProvider>, bot: BotIdentity) -> Self {
        Self { store, llm, bot }
    }

    pub fn bot(&self) -> &BotIdentity {
        &self.bot
    }

    /// All stored messages in display order
    pub async fn list_messages(&self) -> Result<Vec<ChatMessage>, RelayError> {
        Ok(self.store.list_messages().await?)
    }

    /// Store the user's message, ask the LLM, store the reply
    #[instrument(skip_all)]
    pub async fn post_message(&self, request: SendMessageRequest) -> Result<MessagePair, RelayError> {
        let new_message = request.validate().map_err(RelayError::Validation)?;
        debug!(name = %new_message.name, "message received");

        let user_message = self.store.insert_message(new_message).await?;
        debug!(id = %user_message.id, "user message persisted");

        let reply_text = reply_or_fallback(self.llm.as_ref(), &user_message.content).await;
        debug!(chars = reply_text.len(), "LLM queried");

        let llm_message = match self.store.insert_message(self.bot.reply(reply_text)).await {
            Ok(message) => message,
            Err(e) => {
                // The user message stays; no compensating delete
                tracing::warn!(user_message_id = %user_message.id, "reply not persisted; user message left without reply");
                return Err(e.into());
            }
        };

        info!(
            user_message_id = %user_message.id,
            llm_message_id = %llm_message.id,
            "message pair stored"
        );

        Ok(MessagePair {
            user_message,
            llm_message,
        })
    }
}
