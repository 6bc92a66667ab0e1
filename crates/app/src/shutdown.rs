//! Graceful shutdown — first signal wins, unpublish once, bounded wait.
//!
//! Several termination signals may arrive in quick succession. Only the first
//! one is recorded; the others are logged and ignored. Once a signal is
//! recorded the accessory is unpublished under a grace period, after which the
//! caller exits with the signal-derived code whatever the outcome.

use std::time::Duration;

use tokio::sync::watch;

use minihap_domain::error::MiniHapError;
use minihap_domain::signal::ShutdownSignal;

use crate::ports::AccessoryTransport;
use crate::services::publisher::AccessoryPublisher;

/// Default bound on how long unpublishing may take.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(1);

/// Unpublishing did not complete within the grace period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unpublish did not complete within {grace:?}")]
pub struct ShutdownTimeout {
    pub grace: Duration,
}

/// How the unpublish step of a shutdown ended.
#[derive(Debug)]
pub enum UnpublishOutcome {
    Completed,
    Failed(MiniHapError),
    TimedOut(ShutdownTimeout),
}

/// Result of a shutdown, carrying the exit code the process should use.
#[derive(Debug)]
pub struct ShutdownOutcome {
    pub signal: ShutdownSignal,
    pub unpublish: UnpublishOutcome,
}

impl ShutdownOutcome {
    /// `128 + signal number`, regardless of how unpublishing went.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.signal.exit_code()
    }
}

/// One-shot latch recording the first termination signal.
pub struct ShutdownCoordinator {
    sender: watch::Sender<Option<ShutdownSignal>>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl ShutdownCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signal` if no signal was recorded yet.
    ///
    /// Returns `true` for the signal that starts the shutdown and `false` for
    /// every later one.
    pub fn trigger(&self, signal: ShutdownSignal) -> bool {
        let first = self.sender.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(signal);
            true
        });
        if first {
            tracing::info!(%signal, "shutdown requested");
        } else {
            tracing::warn!(%signal, "shutdown already in progress, ignoring signal");
        }
        first
    }

    /// The signal that started the shutdown, if any.
    #[must_use]
    pub fn signal(&self) -> Option<ShutdownSignal> {
        *self.sender.borrow()
    }

    /// Wait until a signal has been recorded and return it.
    pub async fn wait(&self) -> ShutdownSignal {
        let mut receiver = self.sender.subscribe();
        loop {
            let current = *receiver.borrow_and_update();
            if let Some(signal) = current {
                return signal;
            }
            if receiver.changed().await.is_err() {
                break;
            }
        }
        // No signal can be recorded once the channel is closed.
        std::future::pending().await
    }

    /// Wait for the first signal, then unpublish under `grace`.
    ///
    /// Unpublish is invoked once per call; the publisher's lifecycle rejects
    /// any later attempt.
    pub async fn drive<T: AccessoryTransport>(
        &self,
        publisher: &mut AccessoryPublisher<T>,
        grace: Duration,
    ) -> ShutdownOutcome {
        let signal = self.wait().await;
        let unpublish = match tokio::time::timeout(grace, publisher.unpublish()).await {
            Ok(Ok(())) => UnpublishOutcome::Completed,
            Ok(Err(err)) => {
                tracing::error!(error = %err, "unpublish failed during shutdown");
                UnpublishOutcome::Failed(err)
            }
            Err(_) => {
                let timeout = ShutdownTimeout { grace };
                tracing::error!(error = %timeout, "giving up on unpublish");
                UnpublishOutcome::TimedOut(timeout)
            }
        };
        let outcome = ShutdownOutcome { signal, unpublish };
        tracing::info!(
            %signal,
            exit_code = outcome.exit_code(),
            "shutdown complete"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Instant;

    use minihap_domain::accessory::Registration;
    use minihap_domain::error::TransportError;
    use minihap_domain::lifecycle::PublicationState;

    use crate::ports::SharedHandler;
    use crate::services::publisher::tests::{CountingTransport, NoopHandler, registration};

    /// Transport whose unpublish never completes.
    struct HangingTransport;

    impl AccessoryTransport for HangingTransport {
        async fn publish(
            &mut self,
            _registration: &Registration,
            _handler: SharedHandler,
        ) -> Result<(), TransportError> {
            Ok(())
        }

        async fn unpublish(&mut self) -> Result<(), TransportError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    async fn published<T: AccessoryTransport>(transport: T) -> AccessoryPublisher<T> {
        let mut publisher = AccessoryPublisher::new(transport);
        publisher
            .publish(&registration(), Arc::new(NoopHandler))
            .await
            .unwrap();
        publisher
    }

    #[test]
    fn should_accept_only_first_signal() {
        let coordinator = ShutdownCoordinator::new();
        assert!(coordinator.trigger(ShutdownSignal::Terminate));
        assert!(!coordinator.trigger(ShutdownSignal::Interrupt));
        assert!(!coordinator.trigger(ShutdownSignal::Terminate));
        assert_eq!(coordinator.signal(), Some(ShutdownSignal::Terminate));
    }

    #[test]
    fn should_have_no_signal_before_trigger() {
        let coordinator = ShutdownCoordinator::new();
        assert_eq!(coordinator.signal(), None);
    }

    #[tokio::test]
    async fn should_return_immediately_when_already_triggered() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.trigger(ShutdownSignal::Interrupt);
        assert_eq!(coordinator.wait().await, ShutdownSignal::Interrupt);
    }

    #[tokio::test]
    async fn should_wake_waiter_when_signal_arrives_later() {
        let coordinator = Arc::new(ShutdownCoordinator::new());
        let waiter = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.wait().await })
        };
        tokio::task::yield_now().await;

        coordinator.trigger(ShutdownSignal::Terminate);

        assert_eq!(waiter.await.unwrap(), ShutdownSignal::Terminate);
    }

    #[tokio::test]
    async fn should_keep_waiting_until_a_signal_is_recorded() {
        let coordinator = ShutdownCoordinator::new();
        let waited = tokio::time::timeout(Duration::from_millis(20), coordinator.wait()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn should_unpublish_once_when_signal_arrives_twice() {
        let coordinator = ShutdownCoordinator::new();
        let mut publisher = published(CountingTransport::default()).await;

        coordinator.trigger(ShutdownSignal::Terminate);
        coordinator.trigger(ShutdownSignal::Terminate);
        let outcome = coordinator.drive(&mut publisher, DEFAULT_GRACE).await;

        assert!(matches!(outcome.unpublish, UnpublishOutcome::Completed));
        assert_eq!(outcome.exit_code(), 143);
        assert_eq!(publisher.transport().unpublishes.load(Ordering::SeqCst), 1);
        assert_eq!(publisher.state(), PublicationState::Retired);
    }

    #[tokio::test]
    async fn should_use_exit_code_of_first_signal() {
        let coordinator = ShutdownCoordinator::new();
        let mut publisher = published(CountingTransport::default()).await;

        coordinator.trigger(ShutdownSignal::Interrupt);
        coordinator.trigger(ShutdownSignal::Terminate);
        let outcome = coordinator.drive(&mut publisher, DEFAULT_GRACE).await;

        assert_eq!(outcome.signal, ShutdownSignal::Interrupt);
        assert_eq!(outcome.exit_code(), 130);
    }

    #[tokio::test]
    async fn should_not_unpublish_again_when_driven_twice() {
        let coordinator = ShutdownCoordinator::new();
        let mut publisher = published(CountingTransport::default()).await;
        coordinator.trigger(ShutdownSignal::Terminate);

        coordinator.drive(&mut publisher, DEFAULT_GRACE).await;
        let second = coordinator.drive(&mut publisher, DEFAULT_GRACE).await;

        assert!(matches!(second.unpublish, UnpublishOutcome::Failed(_)));
        assert_eq!(publisher.transport().unpublishes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_give_up_after_grace_period() {
        let coordinator = ShutdownCoordinator::new();
        let mut publisher = published(HangingTransport).await;
        let grace = Duration::from_millis(50);

        coordinator.trigger(ShutdownSignal::Terminate);
        let started = Instant::now();
        let outcome = coordinator.drive(&mut publisher, grace).await;

        assert!(matches!(
            outcome.unpublish,
            UnpublishOutcome::TimedOut(ShutdownTimeout { grace: g }) if g == grace
        ));
        assert_eq!(outcome.exit_code(), 143);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn should_report_transport_failure_but_keep_exit_code() {
        let coordinator = ShutdownCoordinator::new();
        let transport = CountingTransport {
            fail_unpublish: true,
            ..CountingTransport::default()
        };
        let mut publisher = published(transport).await;

        coordinator.trigger(ShutdownSignal::Interrupt);
        let outcome = coordinator.drive(&mut publisher, DEFAULT_GRACE).await;

        assert!(matches!(outcome.unpublish, UnpublishOutcome::Failed(_)));
        assert_eq!(outcome.exit_code(), 130);
    }
}
