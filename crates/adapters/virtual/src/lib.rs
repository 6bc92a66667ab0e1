//! # minihap-adapter-virtual
//!
//! Virtual/demo devices standing in for real hardware.
//!
//! ## Provided devices
//!
//! | Device | Behaviour |
//! |--------|-----------|
//! | [`SimulatedOutlet`] | Holds an on/off flag, reports every change on a [`StatusSink`](minihap_app::ports::StatusSink) |
//!
//! ## Dependency rule
//!
//! Depends on `minihap-app` (port traits) and `minihap-domain` only.

mod outlet;

pub use outlet::SimulatedOutlet;
