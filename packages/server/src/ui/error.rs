//! Mapping of hub errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chatrelay_shared::protocol::{ErrorKind, ErrorResponse};

use crate::domain::HubError;

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            HubError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, ErrorKind::InvalidArgument),
            HubError::Connection { .. } => (StatusCode::BAD_GATEWAY, ErrorKind::ConnectionError),
        };
        let body = ErrorResponse {
            kind,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
