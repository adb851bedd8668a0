//! JSON wire types exchanged between the hub and its participants.
//!
//! Hub endpoints:
//! - `POST /api/join`    `JoinRequest`  -> `HistoryResponse` | `ErrorResponse`
//! - `GET  /api/history`                -> `HistoryResponse`
//! - `POST /api/send`    `SendRequest`  -> `SendResponse`
//!
//! Participant endpoints:
//! - `GET  /api/health`                 -> `HealthResponse`
//! - `POST /api/receive` `ChatEventDto` -> 204 No Content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const JOIN_PATH: &str = "/api/join";
pub const HISTORY_PATH: &str = "/api/history";
pub const SEND_PATH: &str = "/api/send";
pub const HEALTH_PATH: &str = "/api/health";
pub const RECEIVE_PATH: &str = "/api/receive";
pub const PARTICIPANTS_PATH: &str = "/debug/participants";

/// One chat event on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEventDto {
    pub sender_identity: String,
    /// RFC 3339 instant
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub identity: String,
    /// Address of the participant's inbound endpoint (`host:port` or base URL)
    pub endpoint_address: String,
}

/// Reply of both Join and GetHistory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<ChatEventDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub identity: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    ConnectionError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<String>,
}
