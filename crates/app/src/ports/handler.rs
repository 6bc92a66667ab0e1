//! Handler port — what a transport calls when a controller talks to the accessory.
//!
//! There is one method per request kind. Each method runs to completion and
//! its return value is the completion callback: a transport answers the
//! controller with the `Ok` value or the error, exactly once.

use std::sync::Arc;

use minihap_domain::error::DeviceError;

/// Request handlers bound to a published accessory.
pub trait AccessoryHandler: Send + Sync {
    /// Read of the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot be queried.
    fn on_get(&self) -> Result<bool, DeviceError>;

    /// Write of the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot apply the value.
    fn on_set(&self, value: bool) -> Result<(), DeviceError>;

    /// Identify request, `paired` tells whether the controller is paired.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device cannot be reached.
    fn on_identify(&self, paired: bool) -> Result<(), DeviceError>;
}

/// Handler shared between the publisher and a transport.
pub type SharedHandler = Arc<dyn AccessoryHandler>;
