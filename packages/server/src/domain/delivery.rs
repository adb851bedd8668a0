//! Delivery seam between the hub core and the transport.
//!
//! `DeliveryConnector` establishes a channel to a participant's inbound endpoint,
//! `DeliveryChannel` invokes that participant's receive contract. Implementations
//! live in the infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    entity::ChatEvent,
    error::{ConnectError, DeliveryError},
    value_object::EndpointAddress,
};

/// Open outbound channel to one participant
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Invoke the participant's receive call once, without retry
    async fn deliver(&self, event: &ChatEvent) -> Result<(), DeliveryError>;

    /// Close the channel. Closing twice is a no-op.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// Factory for delivery channels
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryConnector: Send + Sync {
    /// Establish a channel, failing if the endpoint is unreachable right now
    async fn connect(
        &self,
        address: &EndpointAddress,
    ) -> Result<Arc<dyn DeliveryChannel>, ConnectError>;
}
