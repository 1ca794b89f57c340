//! Demo rows for a fresh database

use tracing::info;

use crate::{
    models::{ChatMessage, NewChatMessage, Position},
    store::{error::Result, MessageStore},
};

pub const ALICE_AVATAR_URL: &str = "https://img.daisyui.com/images/profile/demo/kenobee@192.webp";
pub const BOB_AVATAR_URL: &str = "https://img.daisyui.com/images/profile/demo/anakeen@192.webp";

/// The two greeting messages written by the `seed` binary
pub fn demo_messages() -> Vec<NewChatMessage> {
    vec![
        NewChatMessage::new("Alice", ALICE_AVATAR_URL, "Hi there!", Position::Start),
        NewChatMessage::new("Bob", BOB_AVATAR_URL, "Hello!", Position::End),
    ]
}

/// Insert the demo messages in order
pub async fn seed_demo_messages(store: &dyn MessageStore) -> Result<Vec<ChatMessage>> {
    let mut written = Vec::new();
    for msg in demo_messages() {
        let stored = store.insert_message(msg).await?;
        info!(id = %stored.id, name = %stored.name, "seeded message");
        written.push(stored);
    }
    Ok(written)
}
