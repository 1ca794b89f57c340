use crate::{
    models::{ChatMessage, Position},
    store::error::{Result, StoreError},
};
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

/// Parse a message row from the database
pub(crate) fn parse_message_row(row: &Row) -> Result<ChatMessage> {
    let position: String = row.try_get("position")?;
    let position = position
        .parse::<Position>()
        .map_err(StoreError::DecodeError)?;

    let id: Uuid = row.try_get("id")?;
    let time: DateTime<Utc> = row.try_get("time")?;

    Ok(ChatMessage {
        id,
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
        content: row.try_get("content")?,
        position,
        time,
    })
}

/// Retrieve every stored message
///
/// Rows are ordered by `time`, then by insertion sequence, so equal
/// timestamps always come back in the order they were written.
pub async fn list_messages(pool: &Pool) -> Result<Vec<ChatMessage>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT id, name, avatar_url, content, position, time
             FROM chat_messages
             ORDER BY time ASC, seq ASC",
            &[],
        )
        .await?;

    rows.iter().map(parse_message_row).collect()
}
