//! Inbound endpoint of a participant.
//!
//! The hub probes `GET /api/health` when the participant joins and pushes every
//! broadcast event to `POST /api/receive`. Received events are forwarded into an
//! unbounded channel; once its receiver is gone the endpoint answers 503, which the
//! hub treats as a failed delivery.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chatrelay_shared::protocol::{ChatEventDto, HEALTH_PATH, HealthResponse, RECEIVE_PATH};
use tokio::{net::TcpListener, sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::error::ClientError;

/// Router with the health and receive endpoints
pub fn router(events: UnboundedSender<ChatEventDto>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(RECEIVE_PATH, post(receive))
        .with_state(events)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn receive(
    State(events): State<UnboundedSender<ChatEventDto>>,
    Json(event): Json<ChatEventDto>,
) -> StatusCode {
    match events.send(event) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => {
            tracing::debug!("Receiver dropped, refusing delivery");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Running inbound endpoint; the server task is aborted on drop
pub struct InboundEndpoint {
    local_addr: SocketAddr,
    task: JoinHandle<()>,
}

impl InboundEndpoint {
    /// Bind `listen_addr` and serve the inbound router in the background
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Io` if the address cannot be bound.
    pub async fn spawn(
        listen_addr: &str,
        events: UnboundedSender<ChatEventDto>,
    ) -> Result<Self, ClientError> {
        let listener = TcpListener::bind(listen_addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Inbound endpoint listening on {}", local_addr);

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router(events)).await {
                tracing::error!("Inbound endpoint error: {}", e);
            }
        });

        Ok(Self { local_addr, task })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for InboundEndpoint {
    fn drop(&mut self) {
        self.task.abort();
    }
}
