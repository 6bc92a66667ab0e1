//! In-process transport — routes requests to the handler without any network.
//!
//! Used directly by tests and as the dispatch layer of network transports:
//! a transport that only advertises (such as mDNS) wraps this one and hands
//! out its [`Controller`].

use std::sync::{Arc, Mutex, PoisonError};

use minihap_domain::accessory::Registration;
use minihap_domain::error::{MiniHapError, TransportError};
use minihap_domain::id::AccessoryId;

use crate::ports::{AccessoryTransport, SharedHandler};

struct Published {
    accessory: AccessoryId,
    handler: SharedHandler,
}

type Slot = Arc<Mutex<Option<Published>>>;

/// Transport keeping the published handler in memory.
#[derive(Clone, Default)]
pub struct InProcessTransport {
    slot: Slot,
}

impl InProcessTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for issuing controller requests against this transport.
    #[must_use]
    pub fn controller(&self) -> Controller {
        Controller {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Identifier of the published accessory, if any.
    #[must_use]
    pub fn published(&self) -> Option<AccessoryId> {
        lock(&self.slot).as_ref().map(|p| p.accessory)
    }
}

impl AccessoryTransport for InProcessTransport {
    async fn publish(
        &mut self,
        registration: &Registration,
        handler: SharedHandler,
    ) -> Result<(), TransportError> {
        let mut slot = lock(&self.slot);
        if slot.is_some() {
            return Err(TransportError::AlreadyPublished);
        }
        *slot = Some(Published {
            accessory: registration.id,
            handler,
        });
        tracing::debug!(accessory = %registration.id, "handler registered");
        Ok(())
    }

    async fn unpublish(&mut self) -> Result<(), TransportError> {
        let previous = lock(&self.slot).take();
        match previous {
            Some(p) => {
                tracing::debug!(accessory = %p.accessory, "handler dropped");
                Ok(())
            }
            None => Err(TransportError::NotPublished),
        }
    }
}

/// Issues GET / SET / identify requests the way a remote controller would.
#[derive(Clone)]
pub struct Controller {
    slot: Slot,
}

impl Controller {
    /// Read the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotPublished`] outside the published state,
    /// or the device error reported by the handler.
    pub fn read_on(&self) -> Result<bool, MiniHapError> {
        Ok(self.handler()?.on_get()?)
    }

    /// Write the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotPublished`] outside the published state,
    /// or the device error reported by the handler.
    pub fn write_on(&self, value: bool) -> Result<(), MiniHapError> {
        Ok(self.handler()?.on_set(value)?)
    }

    /// Ask the accessory to identify itself.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotPublished`] outside the published state,
    /// or the device error reported by the handler.
    pub fn identify(&self, paired: bool) -> Result<(), MiniHapError> {
        Ok(self.handler()?.on_identify(paired)?)
    }

    // Clone the handler out so the lock is not held while it runs.
    fn handler(&self) -> Result<SharedHandler, TransportError> {
        lock(&self.slot)
            .as_ref()
            .map(|p| Arc::clone(&p.handler))
            .ok_or(TransportError::NotPublished)
    }
}

fn lock(slot: &Slot) -> std::sync::MutexGuard<'_, Option<Published>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
