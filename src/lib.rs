pub mod api;
pub mod chart;
pub mod clock;
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod journal; // Symptom journal
pub mod models;
pub mod portal; // HTML shell
pub mod resources;
pub mod session;
pub mod trend; // Rule-based suggestions

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::ApiServer;
use crate::config::{ConfigError, ServerConfig};
use crate::core_state::CoreState;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Server(String),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Install the global `tracing` subscriber.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Serve the portal until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    let core = Arc::new(CoreState::new());
    let mut server = ApiServer::start(core, config.addr)
        .await
        .map_err(RunError::Server)?;

    tracing::info!(addr = %server.info.server_addr, "Portal available");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    Ok(())
}
