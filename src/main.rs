//! chat_relay server entry point.
//!
//! Startup order: configuration, tracing, message store, LLM client, routes.

use std::sync::Arc;

use chat_relay::config::{AppConfig, LogConfig};
use chat_relay::llm::AnythingLlmClient;
use chat_relay::relay::RelayService;
use chat_relay::routes::configure_routes;
use chat_relay::store::{PgMessageStore, StoreConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    LogConfig::from_env().init_tracing();

    let cfg = AppConfig::from_env()?;
    info!(version = env!("CARGO_PKG_VERSION"), "chat_relay starting");

    let store_config =
        StoreConfig::from_connection_string(&cfg.database_url)?.with_max_pool_size(cfg.db_pool_size);
    let store = PgMessageStore::new(store_config).await?;
    store.ensure_schema().await?;
    info!("message store ready");

    let llm = AnythingLlmClient::new(cfg.llm.clone())?;
    info!(workspace = %cfg.llm.workspace_id, "LLM client ready");

    let service = Arc::new(RelayService::new(
        Arc::new(store),
        Arc::new(llm),
        cfg.bot.clone(),
    ));
    let routes = configure_routes(service, Arc::new(cfg.uploads.clone()));

    info!(addr = %cfg.bind_address, "Starting server");
    warp::serve(routes).run(cfg.bind_address).await;
    Ok(())
}
