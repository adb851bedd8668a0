//! HTTP surface of the hub.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
