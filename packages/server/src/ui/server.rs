//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, domain::MembershipRegistry, usecase::RelayConnectionUseCase};

use super::{
    handler::{get_connections, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Broadcast relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(relay_connection_usecase, registry);
/// server.run(&ServerConfig::default()).await?;
/// ```
pub struct Server {
    /// RelayConnectionUseCase (per-connection lifecycle)
    relay_connection_usecase: Arc<RelayConnectionUseCase>,
    /// Membership registry shared with the use case
    registry: Arc<dyn MembershipRegistry>,
}

impl Server {
    pub fn new(
        relay_connection_usecase: Arc<RelayConnectionUseCase>,
        registry: Arc<dyn MembershipRegistry>,
    ) -> Self {
        Self {
            relay_connection_usecase,
            registry,
        }
    }

    /// Build the router with all endpoints.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            relay_connection_usecase: self.relay_connection_usecase.clone(),
            registry: self.registry.clone(),
        });

        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/connections", get(get_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `config` and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(config.bind_addr()).await?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", config.bind_addr());
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
