//! Publication lifecycle of an accessory.
//!
//! ```text
//! Unpublished ──publish──▶ Published ──begin_unpublish──▶ Unpublishing ──finish──▶ Retired
//!      ▲                       │
//!      └── transport refused ──┘
//! ```
//!
//! There is no re-publish cycle: once [`Retired`](PublicationState::Retired)
//! the accessory stays unpublished for the rest of the process.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Where an accessory currently is in its publication lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationState {
    #[default]
    Unpublished,
    Published,
    Unpublishing,
    /// Terminal unpublished state.
    Retired,
}

impl PublicationState {
    /// Whether request handlers may be reached by a transport.
    #[must_use]
    pub fn accepts_requests(self) -> bool {
        matches!(self, Self::Published)
    }

    /// Transition taken when `publish` is requested.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless currently
    /// [`Unpublished`](Self::Unpublished).
    pub fn publish(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Unpublished => Ok(Self::Published),
            state => Err(LifecycleError::InvalidTransition {
                action: "publish",
                state,
            }),
        }
    }

    /// Transition taken when `unpublish` starts.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless currently
    /// [`Published`](Self::Published). A second unpublish request therefore
    /// fails instead of reaching the transport again.
    pub fn begin_unpublish(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Published => Ok(Self::Unpublishing),
            state => Err(LifecycleError::InvalidTransition {
                action: "unpublish",
                state,
            }),
        }
    }

    /// Transition taken once the transport has finished unpublishing.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless currently
    /// [`Unpublishing`](Self::Unpublishing).
    pub fn finish_unpublish(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Unpublishing => Ok(Self::Retired),
            state => Err(LifecycleError::InvalidTransition {
                action: "finish unpublishing",
                state,
            }),
        }
    }
}

impl fmt::Display for PublicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpublished => f.write_str("unpublished"),
            Self::Published => f.write_str("published"),
            Self::Unpublishing => f.write_str("unpublishing"),
            Self::Retired => f.write_str("retired"),
        }
    }
}
