//! Status port — where power status records are reported.

use std::sync::Arc;

use minihap_domain::status::PowerStatus;

/// Receives one [`PowerStatus`] per power change.
///
/// Emission is fire-and-forget: a sink that fails to deliver logs the
/// failure itself and never blocks the device.
pub trait StatusSink: Send + Sync {
    fn emit(&self, status: PowerStatus);
}

impl<T: StatusSink + ?Sized> StatusSink for Arc<T> {
    fn emit(&self, status: PowerStatus) {
        (**self).emit(status);
    }
}
