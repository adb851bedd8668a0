//! Hub facade: Join, GetHistory and Send.
//!
//! The message log and the participant registry share one exclusion lock. Network
//! calls (the reachability probe of Join) happen before the lock is taken, and a
//! broadcast queue slot is reserved before the lock as well, so a full queue makes
//! the caller wait without stalling anybody else. The reserved slot is filled while
//! the lock is still held, which keeps queue order identical to log order.

use std::{sync::Arc, time::Duration};

use chatrelay_shared::time::Clock;
use tokio::{
    sync::mpsc::{self, Permit},
    task::JoinHandle,
};

use crate::{
    config::HubConfig,
    domain::{
        ChatEvent, DeliveryChannel, DeliveryConnector, EndpointAddress, HubError, ParticipantId,
    },
};

use super::{
    broadcast::{BroadcastEngine, BroadcastItem},
    state::{SharedState, shared_state},
};

/// Explicitly constructed hub instance, shared behind an `Arc`
pub struct Hub {
    state: SharedState,
    queue: mpsc::Sender<BroadcastItem>,
    connector: Arc<dyn DeliveryConnector>,
    clock: Arc<dyn Clock>,
    connect_timeout: Duration,
}

impl Hub {
    /// Create a hub and the broadcast engine draining its queue
    ///
    /// The engine does nothing until [`BroadcastEngine::run`] is polled; see
    /// [`Hub::start`] for the usual wiring.
    pub fn new(
        config: &HubConfig,
        connector: Arc<dyn DeliveryConnector>,
        clock: Arc<dyn Clock>,
    ) -> (Self, BroadcastEngine) {
        let state = shared_state();
        let (queue, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let engine = BroadcastEngine::new(state.clone(), receiver, config.delivery_timeout);

        let hub = Self {
            state,
            queue,
            connector,
            clock,
            connect_timeout: config.connect_timeout,
        };
        (hub, engine)
    }

    /// Create a hub and spawn its broadcast engine on the current runtime
    ///
    /// The engine task finishes once the returned hub (and every clone of the
    /// `Arc`) has been dropped and the queue is drained.
    pub fn start(
        config: &HubConfig,
        connector: Arc<dyn DeliveryConnector>,
        clock: Arc<dyn Clock>,
    ) -> (Arc<Self>, JoinHandle<()>) {
        let (hub, engine) = Self::new(config, connector, clock);
        (Arc::new(hub), tokio::spawn(engine.run()))
    }

    /// Register a participant and return the full history, including its own join notice
    ///
    /// # Errors
    ///
    /// * `HubError::InvalidArgument` - empty identity or endpoint address
    /// * `HubError::Connection` - the endpoint could not be reached
    ///
    /// Either way nothing is registered and nothing is logged.
    pub async fn join(
        &self,
        identity: &str,
        endpoint_address: &str,
    ) -> Result<Vec<ChatEvent>, HubError> {
        let participant = ParticipantId::new(identity.to_string())?;
        let address = EndpointAddress::new(endpoint_address.to_string())?;

        let channel = self.connect(&address).await?;
        let permit = self.reserve_slot().await;

        let (history, participant_count) = {
            let mut state = self.state.lock().await;
            state.registry.register(participant.clone(), channel);

            let notice = ChatEvent::joined(&participant, self.clock.now());
            state.log.append(notice.clone());
            Self::enqueue(permit, BroadcastItem::join_notice(notice, &participant));

            (state.log.snapshot(), state.registry.len())
        };

        tracing::info!(
            "Participant '{}' joined ({}). Total participants: {}",
            participant,
            address,
            participant_count
        );
        Ok(history)
    }

    /// Full history snapshot in arrival order
    pub async fn get_history(&self) -> Vec<ChatEvent> {
        let state = self.state.lock().await;
        state.log.snapshot()
    }

    /// Record a message and queue it for broadcast
    ///
    /// The sender is not checked against the registry. Returns once the event is
    /// logged and queued, not once it is delivered.
    pub async fn send(&self, identity: &str, text: &str) -> bool {
        let permit = self.reserve_slot().await;

        let position = {
            let mut state = self.state.lock().await;
            let event = ChatEvent::new(identity, text, self.clock.now());
            let position = state.log.append(event.clone());
            Self::enqueue(permit, BroadcastItem::message(event));
            position
        };

        tracing::debug!("Recorded message #{} from '{}'", position, identity);
        true
    }

    /// Registered identities, sorted
    pub async fn participants(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.registry.identities()
    }

    async fn connect(
        &self,
        address: &EndpointAddress,
    ) -> Result<Arc<dyn DeliveryChannel>, HubError> {
        match tokio::time::timeout(self.connect_timeout, self.connector.connect(address)).await {
            Ok(Ok(channel)) => Ok(channel),
            Ok(Err(error)) => {
                tracing::warn!("Join rejected: {}", error);
                Err(error.into())
            }
            Err(_) => {
                tracing::warn!(
                    "Join rejected: no answer from {} within {:?}",
                    address,
                    self.connect_timeout
                );
                Err(HubError::Connection {
                    address: address.to_string(),
                    reason: format!("timed out after {:?}", self.connect_timeout),
                })
            }
        }
    }

    /// Wait for room in the broadcast queue (back-pressure)
    async fn reserve_slot(&self) -> Option<Permit<'_, BroadcastItem>> {
        match self.queue.reserve().await {
            Ok(permit) => Some(permit),
            Err(_) => {
                tracing::error!("Broadcast engine is not running, events will only be logged");
                None
            }
        }
    }

    fn enqueue(permit: Option<Permit<'_, BroadcastItem>>, item: BroadcastItem) {
        if let Some(permit) = permit {
            permit.send(item);
        }
    }
}
