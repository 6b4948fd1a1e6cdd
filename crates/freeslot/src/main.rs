use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use freeslot::analysis::GeminiClient;
use freeslot::config::AppConfig;
use freeslot::server;
use freeslot::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    if config.enrichment.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; every analysis will use the local engine");
    }

    let enrichment = GeminiClient::with_config(config.enrichment.clone())?;
    let state = Arc::new(AppState::new(enrichment));

    let router = server::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
