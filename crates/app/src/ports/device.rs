//! Device port — the hardware (or simulation) behind an accessory.

use std::sync::Arc;

use minihap_domain::error::DeviceError;

/// A device with a single on/off power property.
///
/// Implementations are expected to answer quickly: they run on the request
/// path of a controller that gives up after a few seconds.
pub trait PowerDevice: Send + Sync {
    /// Index of the device, reported in status records.
    fn id(&self) -> u32;

    /// Apply the power state and report it on the status channel.
    ///
    /// Repeated calls with the same value are not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot apply the state.
    fn set_power(&self, on: bool) -> Result<(), DeviceError>;

    /// Read the live power state.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot be queried.
    fn power(&self) -> Result<bool, DeviceError>;

    /// Make the device noticeable to a user trying to locate it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot be reached.
    fn identify(&self) -> Result<(), DeviceError>;
}

impl<T: PowerDevice + ?Sized> PowerDevice for Arc<T> {
    fn id(&self) -> u32 {
        (**self).id()
    }

    fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        (**self).set_power(on)
    }

    fn power(&self) -> Result<bool, DeviceError> {
        (**self).power()
    }

    fn identify(&self) -> Result<(), DeviceError> {
        (**self).identify()
    }
}
