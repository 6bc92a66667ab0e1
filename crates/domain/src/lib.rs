//! # minihap-domain
//!
//! Pure domain model for the minihap accessory daemon.
//!
//! ## Responsibilities
//! - Foundational types: deterministic accessory identifiers, error conventions
//! - Define **Registrations** (identity, credentials, category, services)
//! - Define the **publication lifecycle** (unpublished → published → unpublishing → retired)
//! - Define **shutdown signals** and their exit-code convention
//! - Define the **power status** record emitted on every state change
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod accessory;
pub mod category;
pub mod credentials;
pub mod lifecycle;
pub mod signal;
pub mod status;
