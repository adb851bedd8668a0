//! Shared hub state guarded by the single exclusion lock.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{message_log::MessageLog, registry::ParticipantRegistry};

/// Message log and participant registry, always mutated together
#[derive(Default)]
pub(crate) struct HubState {
    pub log: MessageLog,
    pub registry: ParticipantRegistry,
}

/// The lock is held only for in-memory mutation, never across a network call.
pub(crate) type SharedState = Arc<Mutex<HubState>>;

pub(crate) fn shared_state() -> SharedState {
    Arc::new(Mutex::new(HubState::default()))
}
