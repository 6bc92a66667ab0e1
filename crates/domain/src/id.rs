//! Deterministic accessory identifiers backed by name-based (v5) UUIDs.
//!
//! An accessory must keep the same identity across restarts, otherwise
//! controllers see a brand new device every time the daemon starts. The
//! identifier is therefore derived from a namespace string and a name, with
//! no randomness, clock, or host state involved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a published accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessoryId(Uuid);

impl AccessoryId {
    /// Derive the identifier for `name` within `namespace`.
    ///
    /// The namespace string is first hashed into a namespace UUID (under the
    /// OID namespace), then `name` is hashed under it. The same pair always
    /// yields the same identifier, on every platform.
    #[must_use]
    pub fn generate(namespace: &str, name: &str) -> Self {
        let namespace = Uuid::new_v5(&Uuid::NAMESPACE_OID, namespace.as_bytes());
        Self(Uuid::new_v5(&namespace, name.as_bytes()))
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccessoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
