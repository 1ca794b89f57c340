use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::{
    models::{ChatMessage, NewChatMessage},
    store::{connection::StoreConfig, error::Result, operations, MessageStore},
};

/// PostgreSQL-backed message store
#[derive(Clone)]
pub struct PgMessageStore {
    pool: Pool,
}

impl PgMessageStore {
    /// Create a store from configuration and check that the database answers
    pub async fn new(config: StoreConfig) -> Result<Self> {
        let pool = config.build_pool()?;

        // Test the connection
        let _conn = pool.get().await?;

        Ok(Self { pool })
    }

    /// Create the message table if needed. Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<()> {
        operations::ensure_schema(&self.pool).await
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert_message(&self, msg: NewChatMessage) -> Result<ChatMessage> {
        operations::insert_message(&self.pool, msg).await
    }

    async fn list_messages(&self) -> Result<Vec<ChatMessage>> {
        operations::list_messages(&self.pool).await
    }
}
