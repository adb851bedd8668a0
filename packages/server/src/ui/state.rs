//! Server state shared by the handlers.

use std::sync::Arc;

use crate::hub::Hub;

/// Shared application state
pub struct AppState {
    /// Hub facade（Join / GetHistory / Send）
    pub hub: Arc<Hub>,
}
