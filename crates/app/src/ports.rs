//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod device;
pub mod handler;
pub mod status;
pub mod transport;

pub use device::PowerDevice;
pub use handler::{AccessoryHandler, SharedHandler};
pub use status::StatusSink;
pub use transport::AccessoryTransport;
