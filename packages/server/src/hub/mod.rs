//! Hub core: message log, participant registry, broadcast engine and facade.

mod broadcast;
mod facade;
mod message_log;
mod registry;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::{BroadcastEngine, FanOutReport};
pub use facade::Hub;
pub use message_log::MessageLog;
pub use registry::{Generation, ParticipantRegistry, RegistryEntry};
