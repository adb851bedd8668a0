//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use chatrelay_shared::protocol::{
    HEALTH_PATH, HISTORY_PATH, JOIN_PATH, PARTICIPANTS_PATH, SEND_PATH,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::hub::Hub;

use super::{
    handler::{debug_participants, get_history, health_check, join, send},
    signal::shutdown_signal,
    state::AppState,
};

/// HTTP front of the chat relay hub
///
/// # Example
///
/// ```ignore
/// let (hub, _engine) = Hub::start(&config, connector, Arc::new(SystemClock));
/// Server::new(hub).run("127.0.0.1".to_string(), 9000).await?;
/// ```
pub struct Server {
    hub: Arc<Hub>,
}

impl Server {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }

    /// Build the router without binding anything
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            hub: self.hub.clone(),
        });

        Router::new()
            // Hub operations
            .route(JOIN_PATH, post(join))
            .route(HISTORY_PATH, get(get_history))
            .route(SEND_PATH, post(send))
            // Operational endpoints
            .route(HEALTH_PATH, get(health_check))
            .route(PARTICIPANTS_PATH, get(debug_participants))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the hub server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 9000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay hub listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
