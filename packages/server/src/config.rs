//! Hub configuration.

use std::time::Duration;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Tunables of the hub core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Capacity of the broadcast queue; producers wait when it is full
    pub queue_capacity: usize,
    /// Upper bound of a single delivery call before the recipient is pruned
    pub delivery_timeout: Duration,
    /// Upper bound of the reachability probe performed by Join
    pub connect_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}
