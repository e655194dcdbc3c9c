use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use holomine_lib::local_server::{default_config_dir, LocalServer, ServerConfig};
use holomine_lib::mining::MiningDispatcher;
use holomine_lib::services::PrivacyMiningService;
use holomine_lib::session::InMemorySessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("holomine=info,holomine_lib=info")),
        )
        .init();

    let config_dir = default_config_dir();
    let config = ServerConfig::load_or_init(&config_dir)?;
    tracing::info!(config_dir = %config_dir.display(), port = config.port, "Loaded configuration");

    if config.mining_seed.is_some() {
        tracing::warn!("Mining seed is set; reports will be reproducible");
    }

    let service = PrivacyMiningService::new(
        Arc::new(InMemorySessionStore::new()),
        MiningDispatcher::from_seed(config.mining_seed),
    );
    let server = LocalServer::new(config, service);
    let handle = server.start(None).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    handle.shutdown_and_wait().await;

    Ok(())
}
