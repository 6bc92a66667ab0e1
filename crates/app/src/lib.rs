//! # minihap-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `PowerDevice` — the device behind the accessory
//!   - `StatusSink` — where power status records go
//!   - `AccessoryTransport` — advertises the accessory and routes requests
//!   - `AccessoryHandler` — what the transport calls on GET / SET / identify
//! - Provide the use cases:
//!   - `OutletAccessory` — binds a `PowerDevice` to the handler port
//!   - `AccessoryPublisher` — publish / unpublish lifecycle
//!   - `ShutdownCoordinator` — first-signal-wins shutdown with a grace period
//! - Provide **in-process infrastructure** (status bus, transport) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `minihap-domain` only (plus `tokio::sync` / `tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod shutdown;
pub mod status_bus;
pub mod transport;
