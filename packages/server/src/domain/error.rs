//! Error types for the hub core.

use std::time::Duration;

use thiserror::Error;

/// Validation errors for value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("identity must not be empty")]
    EmptyParticipantId,

    #[error("endpoint address must not be empty")]
    EmptyEndpointAddress,
}

/// Errors surfaced to callers of the hub operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// Malformed request, rejected before any state change
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The participant's endpoint could not be reached at join time
    #[error("cannot reach participant endpoint at {address}: {reason}")]
    Connection { address: String, reason: String },
}

impl From<ValueObjectError> for HubError {
    fn from(error: ValueObjectError) -> Self {
        HubError::InvalidArgument(error.to_string())
    }
}

impl From<ConnectError> for HubError {
    fn from(error: ConnectError) -> Self {
        HubError::Connection {
            address: error.address,
            reason: error.reason,
        }
    }
}

/// Failure to establish a delivery channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot connect to {address}: {reason}")]
pub struct ConnectError {
    pub address: String,
    pub reason: String,
}

/// Failure of a single delivery attempt; never leaves the broadcast engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("delivery channel is closed")]
    Closed,

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("participant rejected the event with status {0}")]
    Rejected(u16),
}
