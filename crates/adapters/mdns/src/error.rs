//! mDNS adapter error types.

use minihap_domain::error::TransportError;

/// Errors specific to the mDNS adapter.
#[derive(Debug, thiserror::Error)]
pub enum MdnsError {
    /// The mDNS daemon could not be started.
    #[error("failed to start mDNS daemon")]
    Daemon(#[source] mdns_sd::Error),

    /// The service record could not be built from the registration.
    #[error("invalid mDNS service record")]
    ServiceInfo(#[source] mdns_sd::Error),

    /// The daemon refused the registration.
    #[error("failed to register mDNS service")]
    Register(#[source] mdns_sd::Error),

    /// The daemon refused the unregistration.
    #[error("failed to unregister mDNS service")]
    Unregister(#[source] mdns_sd::Error),

    /// The daemon went away before acknowledging a request.
    #[error("mDNS daemon stopped before answering")]
    DaemonGone,

    /// The registration lacks credentials or category.
    #[error("registration is missing {0}")]
    IncompleteRegistration(&'static str),
}

impl From<MdnsError> for TransportError {
    fn from(err: MdnsError) -> Self {
        Self::Advertiser(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_daemon_gone_error() {
        assert_eq!(
            MdnsError::DaemonGone.to_string(),
            "mDNS daemon stopped before answering"
        );
    }

    #[test]
    fn should_convert_into_advertiser_transport_error() {
        let err: TransportError = MdnsError::IncompleteRegistration("credentials").into();
        assert!(matches!(err, TransportError::Advertiser(_)));
    }
}
