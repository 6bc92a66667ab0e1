//! Power status record emitted on every power change.

use serde::{Deserialize, Serialize};

/// `{ "id": 0, "power": true }` — one record per `set_power` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStatus {
    /// Index of the device within the daemon.
    pub id: u32,
    pub power: bool,
}

impl PowerStatus {
    #[must_use]
    pub fn new(id: u32, power: bool) -> Self {
        Self { id, power }
    }
}
