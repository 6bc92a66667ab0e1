//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MiniHapError`] via `#[from]` at port boundaries.

/// Top-level error returned across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum MiniHapError {
    #[error("configuration error")]
    Configuration(#[from] ConfigurationError),

    #[error("device error")]
    Device(#[from] DeviceError),

    #[error("lifecycle error")]
    Lifecycle(#[from] LifecycleError),

    #[error("transport error")]
    Transport(#[from] TransportError),
}

/// Invalid registration data, detected before anything is published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("registration is missing credentials")]
    MissingCredentials,

    #[error("registration is missing a category")]
    MissingCategory,

    #[error("registration must expose at least one service")]
    NoServices,

    #[error("invalid username {0:?}, expected XX:XX:XX:XX:XX:XX")]
    InvalidUsername(String),

    #[error("invalid pincode {0:?}, expected DDD-DD-DDD")]
    InvalidPincode(String),

    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// The device failed to apply or report its state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("device {id} is unavailable")]
    Unavailable { id: u32 },
}

/// A publication lifecycle transition that is not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: crate::lifecycle::PublicationState,
    },
}

/// Failures reported by an accessory transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("accessory is not published")]
    NotPublished,

    #[error("accessory is already published")]
    AlreadyPublished,

    #[error("advertiser failure")]
    Advertiser(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::PublicationState;

    #[test]
    fn should_convert_configuration_error_into_minihap_error() {
        let err: MiniHapError = ConfigurationError::MissingCredentials.into();
        assert!(matches!(
            err,
            MiniHapError::Configuration(ConfigurationError::MissingCredentials)
        ));
    }

    #[test]
    fn should_display_device_error_with_id() {
        let err = DeviceError::Unavailable { id: 3 };
        assert_eq!(err.to_string(), "device 3 is unavailable");
    }

    #[test]
    fn should_display_invalid_transition() {
        let err = LifecycleError::InvalidTransition {
            action: "publish",
            state: PublicationState::Retired,
        };
        assert_eq!(err.to_string(), "cannot publish while retired");
    }

    #[test]
    fn should_keep_advertiser_source() {
        let io = std::io::Error::other("socket closed");
        let err = TransportError::Advertiser(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "socket closed");
    }
}
