use crate::{
    models::{ChatMessage, NewChatMessage},
    store::error::Result,
};
use deadpool_postgres::Pool;
use uuid::Uuid;

use super::read::parse_message_row;

/// Create the message table if it does not exist yet
///
/// `seq` is the insertion sequence used to order rows that share a
/// timestamp. `clock_timestamp()` is used instead of `now()` so that two
/// writes in the same session still get distinct wall-clock times.
pub async fn ensure_schema(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;

    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS chat_messages (
            seq         BIGSERIAL PRIMARY KEY,
            id          UUID NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            avatar_url  TEXT NOT NULL,
            content     TEXT NOT NULL,
            position    TEXT NOT NULL CHECK (position IN ('start', 'end')),
            time        TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
        );
        CREATE INDEX IF NOT EXISTS chat_messages_time_seq ON chat_messages (time, seq);",
    )
    .await?;

    Ok(())
}

/// Insert a message and return the stored row
///
/// # Behavior
///
/// 1. **Identity**: a fresh v4 UUID is generated for every write
/// 2. **Timestamp**: the database sets the `time` column
/// 3. **Single statement**: no transaction spans multiple writes
pub async fn insert_message(pool: &Pool, msg: NewChatMessage) -> Result<ChatMessage> {
    let conn = pool.get().await?;

    let id = Uuid::new_v4();
    let row = conn
        .query_one(
            "INSERT INTO chat_messages (id, name, avatar_url, content, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, avatar_url, content, position, time",
            &[
                &id,
                &msg.name,
                &msg.avatar_url,
                &msg.content,
                &msg.position.as_str(),
            ],
        )
        .await?;

    parse_message_row(&row)
}
