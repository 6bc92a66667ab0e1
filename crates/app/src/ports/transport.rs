//! Transport port — advertises an accessory and routes controller requests
//! to its [`AccessoryHandler`](super::AccessoryHandler).

use std::future::Future;

use minihap_domain::accessory::Registration;
use minihap_domain::error::TransportError;

use super::handler::SharedHandler;

/// An accessory-protocol transport.
///
/// The [`AccessoryPublisher`](crate::services::publisher::AccessoryPublisher)
/// drives the lifecycle and guarantees `publish` and `unpublish` are each
/// called at most once, in that order.
pub trait AccessoryTransport {
    /// Start advertising `registration` and route requests to `handler`.
    fn publish(
        &mut self,
        registration: &Registration,
        handler: SharedHandler,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Stop advertising and drop the handler.
    ///
    /// Completes once the transport has actually withdrawn the accessory.
    fn unpublish(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}
