//! Accessory publisher — drives the publication lifecycle over a transport.

use minihap_domain::accessory::Registration;
use minihap_domain::error::MiniHapError;
use minihap_domain::id::AccessoryId;
use minihap_domain::lifecycle::PublicationState;

use crate::ports::{AccessoryTransport, SharedHandler};

/// Owns the transport and the [`PublicationState`] of one accessory.
pub struct AccessoryPublisher<T> {
    transport: T,
    state: PublicationState,
    accessory: Option<AccessoryId>,
}

impl<T: AccessoryTransport> AccessoryPublisher<T> {
    /// Create a new, unpublished publisher over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: PublicationState::Unpublished,
            accessory: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> PublicationState {
        self.state
    }

    /// Identifier of the accessory once published.
    #[must_use]
    pub fn accessory(&self) -> Option<AccessoryId> {
        self.accessory
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `registration` and publish it with `handler`.
    ///
    /// Validation happens before the transport is touched, so an invalid
    /// registration never gets a handler registered.
    ///
    /// # Errors
    ///
    /// Returns [`MiniHapError::Configuration`] for an invalid registration,
    /// [`MiniHapError::Lifecycle`] when not [`Unpublished`](PublicationState::Unpublished),
    /// or [`MiniHapError::Transport`] if the transport refuses (the state
    /// then stays unpublished).
    #[tracing::instrument(skip_all, fields(accessory = %registration.id, name = %registration.display_name))]
    pub async fn publish(
        &mut self,
        registration: &Registration,
        handler: SharedHandler,
    ) -> Result<(), MiniHapError> {
        registration.validate()?;
        let next = self.state.publish()?;
        self.transport.publish(registration, handler).await?;
        self.state = next;
        self.accessory = Some(registration.id);
        tracing::info!("accessory published");
        Ok(())
    }

    /// Withdraw the accessory.
    ///
    /// The state ends in [`Retired`](PublicationState::Retired) even when
    /// the transport reports an error, which is then returned.
    ///
    /// # Errors
    ///
    /// Returns [`MiniHapError::Lifecycle`] when not
    /// [`Published`](PublicationState::Published) (including a second call),
    /// or [`MiniHapError::Transport`] if the transport failed to withdraw.
    #[tracing::instrument(skip_all, fields(accessory = ?self.accessory))]
    pub async fn unpublish(&mut self) -> Result<(), MiniHapError> {
        self.state = self.state.begin_unpublish()?;
        let result = self.transport.unpublish().await;
        self.state = self.state.finish_unpublish()?;
        match &result {
            Ok(()) => tracing::info!("accessory unpublished"),
            Err(err) => tracing::warn!(error = %err, "transport failed to unpublish"),
        }
        result.map_err(MiniHapError::from)
    }
}
