//! Infrastructure layer
//!
//! - `dto`: conversion between domain entities and the JSON wire types
//! - `http_delivery`: `DeliveryConnector` / `DeliveryChannel` over HTTP (reqwest)

pub mod dto;
pub mod http_delivery;

pub use http_delivery::{HttpDeliveryChannel, HttpDeliveryConnector};
