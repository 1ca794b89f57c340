//! Terminal front end for the agent proxy.
//!
//! Every stdin line is sent to the agent. Ctrl-C while a request is in
//! flight cancels it; Ctrl-C at the prompt or Ctrl-D exits.

use std::sync::Arc;

use chat_relay::agent::{run_console, AgentSession, HttpAgentTransport};
use chat_relay::config::{AgentConfig, LogConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    LogConfig::from_env().init_tracing();

    let config = AgentConfig::from_env();
    let session = Arc::new(AgentSession::new(HttpAgentTransport::new(&config.endpoint)?));
    println!(
        "Connected to {} (Ctrl-C cancels a pending request, or exits at the prompt)",
        config.endpoint
    );

    run_console(
        session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        || async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        },
    )
    .await?;

    Ok(())
}
