//! Test doubles for the delivery seam.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{
    ChatEvent, ConnectError, DeliveryChannel, DeliveryConnector, DeliveryError, EndpointAddress,
    ParticipantId,
};

pub(crate) fn participant(id: &str) -> ParticipantId {
    ParticipantId::new(id.to_string()).unwrap()
}

/// Records every delivered event
#[derive(Default)]
pub(crate) struct RecordingChannel {
    received: Mutex<Vec<ChatEvent>>,
    closed: AtomicBool,
    close_calls: AtomicUsize,
}

impl RecordingChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn received(&self) -> Vec<ChatEvent> {
        self.received.lock().unwrap().clone()
    }

    pub(crate) fn received_texts(&self) -> Vec<String> {
        self.received().into_iter().map(|e| e.text).collect()
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    async fn deliver(&self, event: &ChatEvent) -> Result<(), DeliveryError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DeliveryError::Closed);
        }
        self.received.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Every delivery fails as if the peer had vanished
#[derive(Default)]
pub(crate) struct FailingChannel {
    closed: AtomicBool,
}

impl FailingChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DeliveryChannel for FailingChannel {
    async fn deliver(&self, _event: &ChatEvent) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("connection reset by peer".to_string()))
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Never answers within any reasonable delivery timeout
pub(crate) struct StallingChannel {
    stall: Duration,
    closed: AtomicBool,
}

impl StallingChannel {
    pub(crate) fn new(stall: Duration) -> Arc<Self> {
        Arc::new(Self {
            stall,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl DeliveryChannel for StallingChannel {
    async fn deliver(&self, _event: &ChatEvent) -> Result<(), DeliveryError> {
        tokio::time::sleep(self.stall).await;
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Panics inside `deliver`, as a buggy transport would
#[derive(Default)]
pub(crate) struct PanickingChannel {
    closed: AtomicBool,
}

impl PanickingChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DeliveryChannel for PanickingChannel {
    async fn deliver(&self, _event: &ChatEvent) -> Result<(), DeliveryError> {
        panic!("receiver crashed while handling the event");
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Fails a delivery only after the test releases it
#[derive(Default)]
pub(crate) struct GatedFailingChannel {
    entered: Notify,
    release: Notify,
    closed: AtomicBool,
}

impl GatedFailingChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Resolves once a delivery is in progress
    pub(crate) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl DeliveryChannel for GatedFailingChannel {
    async fn deliver(&self, _event: &ChatEvent) -> Result<(), DeliveryError> {
        self.entered.notify_one();
        self.release.notified().await;
        Err(DeliveryError::Transport("connection reset by peer".to_string()))
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Connector backed by a fixed address → channel table
#[derive(Default)]
pub(crate) struct StubConnector {
    endpoints: Mutex<HashMap<String, Arc<dyn DeliveryChannel>>>,
}

impl StubConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_endpoint(self, address: &str, channel: Arc<dyn DeliveryChannel>) -> Self {
        self.endpoints
            .lock()
            .unwrap()
            .insert(address.to_string(), channel);
        self
    }
}

#[async_trait]
impl DeliveryConnector for StubConnector {
    async fn connect(
        &self,
        address: &EndpointAddress,
    ) -> Result<Arc<dyn DeliveryChannel>, ConnectError> {
        self.endpoints
            .lock()
            .unwrap()
            .get(address.as_str())
            .cloned()
            .ok_or_else(|| ConnectError {
                address: address.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

/// Poll `condition` until it holds or roughly two seconds pass
pub(crate) async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
