//! Shared building blocks for the chat relay hub and its participants.
//!
//! - `logger`: tracing subscriber setup for the binaries
//! - `protocol`: JSON wire types and HTTP paths
//! - `time`: clock abstraction and timestamp formatting

pub mod logger;
pub mod protocol;
pub mod time;
