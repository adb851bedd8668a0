//! Domain layer: chat events, participant identities and the delivery seam.
//!
//! The hub core depends only on the traits defined in `delivery`; the concrete
//! transport lives in the infrastructure layer (dependency inversion).

pub mod delivery;
pub mod entity;
pub mod error;
pub mod value_object;

pub use delivery::{DeliveryChannel, DeliveryConnector};
#[cfg(test)]
pub use delivery::MockDeliveryConnector;
pub use entity::{ChatEvent, SYSTEM_SENDER};
pub use error::{ConnectError, DeliveryError, HubError, ValueObjectError};
pub use value_object::{EndpointAddress, ParticipantId};
