//! Chat event entity.

use chrono::{DateTime, Utc};

use super::value_object::ParticipantId;

/// Reserved identity that authors the synthetic join notices
pub const SYSTEM_SENDER: &str = "SERVER";

/// One immutable record of a join notice or a submitted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl ChatEvent {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: sender.into(),
            timestamp,
            text: text.into(),
        }
    }

    /// Join notice for `participant`, attributed to [`SYSTEM_SENDER`]
    pub fn joined(participant: &ParticipantId, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            SYSTEM_SENDER,
            format!("User {} joined", participant),
            timestamp,
        )
    }
}
