//! Chat relay participant.
//!
//! A participant exposes a small inbound HTTP endpoint (health probe and receive),
//! joins the hub advertising that endpoint, and then sends console input to the hub.

pub mod error;
pub mod formatter;
pub mod hub_client;
pub mod inbound;
pub mod runner;
mod ui;

pub use error::ClientError;
pub use hub_client::HubClient;
pub use runner::run_client;
