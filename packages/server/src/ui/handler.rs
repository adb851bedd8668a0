//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use chatrelay_shared::protocol::{
    HealthResponse, HistoryResponse, JoinRequest, ParticipantsResponse, SendRequest, SendResponse,
};

use crate::{domain::HubError, infrastructure::dto::history_to_dto, ui::state::AppState};

/// Join: register the caller and reply with the full history
pub async fn join(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<HistoryResponse>, HubError> {
    let history = state
        .hub
        .join(&request.identity, &request.endpoint_address)
        .await?;
    Ok(Json(HistoryResponse {
        history: history_to_dto(history),
    }))
}

/// GetHistory
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let history = state.hub.get_history().await;
    Json(HistoryResponse {
        history: history_to_dto(history),
    })
}

/// Send
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendRequest>,
) -> Json<SendResponse> {
    let ok = state.hub.send(&request.identity, &request.text).await;
    Json(SendResponse { ok })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Debug endpoint listing the registered participants
pub async fn debug_participants(State(state): State<Arc<AppState>>) -> Json<ParticipantsResponse> {
    Json(ParticipantsResponse {
        participants: state.hub.participants().await,
    })
}
