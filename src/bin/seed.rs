//! Write the demo greeting messages into the configured database.

use chat_relay::config::{ConfigError, LogConfig};
use chat_relay::store::{seed::seed_demo_messages, PgMessageStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    LogConfig::from_env().init_tracing();

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing("DATABASE_URL"))?;

    let store = PgMessageStore::new(StoreConfig::from_connection_string(&database_url)?).await?;
    store.ensure_schema().await?;

    let written = seed_demo_messages(&store).await?;
    println!("Seeded {} messages", written.len());
    Ok(())
}
