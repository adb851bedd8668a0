//! Error types for the chat relay participant.

use chatrelay_shared::protocol::ErrorKind;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The hub refused the join request
    #[error("Join rejected ({kind:?}): {message}")]
    Join { kind: ErrorKind, message: String },

    /// The hub answered with something unexpected
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
