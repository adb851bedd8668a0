//! Chat relay hub.
//!
//! Participants join with an identity and the address of their inbound endpoint,
//! receive the full history in the reply, and from then on get every event
//! submitted by others through the broadcast engine.

// layers
pub mod domain;
pub mod hub;
pub mod infrastructure;
pub mod ui;

pub mod config;
