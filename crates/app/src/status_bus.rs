//! In-process status bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use minihap_domain::status::PowerStatus;

use crate::ports::StatusSink;

/// In-process status bus using a tokio [`broadcast`] channel.
///
/// Emitting succeeds even when there are no active subscribers
/// (the record is simply dropped).
pub struct InProcessStatusBus {
    sender: broadcast::Sender<PowerStatus>,
}

impl InProcessStatusBus {
    /// Create a new status bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to status records on this bus.
    ///
    /// Returns a receiver that will get all records emitted *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PowerStatus> {
        self.sender.subscribe()
    }
}

impl StatusSink for InProcessStatusBus {
    fn emit(&self, status: PowerStatus) {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(status);
    }
}
