//! Outlet accessory — binds a [`PowerDevice`] to the [`AccessoryHandler`] port.
//!
//! Every read goes to the device. The accessory never answers from a cached
//! value, so a controller always sees the live state of the hardware.

use minihap_domain::error::DeviceError;

use crate::ports::{AccessoryHandler, PowerDevice};

/// Accessory adapter for a single on/off outlet.
pub struct OutletAccessory<D> {
    device: D,
}

impl<D: PowerDevice> OutletAccessory<D> {
    /// Create a new accessory driving the given device.
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Access the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: PowerDevice> AccessoryHandler for OutletAccessory<D> {
    fn on_get(&self) -> Result<bool, DeviceError> {
        let on = self.device.power().inspect_err(|err| {
            tracing::warn!(device = self.device.id(), error = %err, "power read failed");
        })?;
        tracing::info!(
            device = self.device.id(),
            "are we on? {}",
            if on { "yes" } else { "no" }
        );
        Ok(on)
    }

    fn on_set(&self, value: bool) -> Result<(), DeviceError> {
        self.device.set_power(value).inspect_err(|err| {
            tracing::warn!(device = self.device.id(), value, error = %err, "power write failed");
        })
    }

    fn on_identify(&self, paired: bool) -> Result<(), DeviceError> {
        tracing::debug!(device = self.device.id(), paired, "identify requested");
        self.device.identify()
    }
}
