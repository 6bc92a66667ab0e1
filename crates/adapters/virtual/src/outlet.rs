//! Simulated outlet — an on/off flag that reports every change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use minihap_app::ports::{PowerDevice, StatusSink};
use minihap_domain::error::DeviceError;
use minihap_domain::status::PowerStatus;

/// A fake outlet exposed as if it were hardware.
///
/// The outlet is always available unless [`set_available`](Self::set_available)
/// says otherwise, which lets callers exercise the device error path.
pub struct SimulatedOutlet<S> {
    id: u32,
    power: Mutex<bool>,
    available: AtomicBool,
    status: S,
}

impl<S: StatusSink> SimulatedOutlet<S> {
    /// Create an outlet that starts switched off.
    pub fn new(id: u32, status: S) -> Self {
        Self {
            id,
            power: Mutex::new(false),
            available: AtomicBool::new(true),
            status,
        }
    }

    /// Simulate the hardware going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        tracing::info!(device = self.id, available, "outlet availability changed");
    }

    fn ensure_available(&self) -> Result<(), DeviceError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DeviceError::Unavailable { id: self.id })
        }
    }
}

impl<S: StatusSink> PowerDevice for SimulatedOutlet<S> {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        self.ensure_available()?;
        let label = if on { "on" } else { "off" };
        tracing::info!(device = self.id, "turning the outlet {label}");
        *self.power.lock().unwrap_or_else(PoisonError::into_inner) = on;
        self.status.emit(PowerStatus::new(self.id, on));
        tracing::info!(device = self.id, "outlet is now {label}");
        Ok(())
    }

    fn power(&self) -> Result<bool, DeviceError> {
        self.ensure_available()?;
        let on = *self.power.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::trace!(device = self.id, on, "power read");
        Ok(on)
    }

    fn identify(&self) -> Result<(), DeviceError> {
        self.ensure_available()?;
        tracing::info!(device = self.id, "identify the outlet");
        Ok(())
    }
}
