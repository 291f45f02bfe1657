//! HTTP server lifecycle: bind → spawn background task → return a handle
//! with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiServerInfo {
    pub server_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running server.
pub struct ApiServer {
    pub info: ApiServerInfo,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Bind `addr` and serve the router in a background task.
    ///
    /// Port 0 picks an ephemeral port; the bound one is in [`ApiServerInfo`].
    pub async fn start(core: Arc<CoreState>, addr: SocketAddr) -> Result<Self, String> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind server on {addr}: {e}"))?;

        let addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to get server address: {e}"))?;

        let app = api_router(core);

        let info = ApiServerInfo {
            server_id: Uuid::new_v4().to_string(),
            server_addr: addr.to_string(),
            port: addr.port(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown_signal = async move {
                let _ = shutdown_rx.await;
                tracing::info!("Server received shutdown signal");
            };

            tracing::info!(%addr, "Server started");

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal)
                .await
            {
                tracing::error!("Server error: {e}");
            }

            tracing::info!("Server stopped");
        });

        Ok(Self {
            info,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Shut down gracefully. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
