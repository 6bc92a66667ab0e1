//! Forwards process termination signals to the [`ShutdownCoordinator`].
//!
//! Every delivered signal is forwarded, the coordinator decides which one
//! counts. Listening continues after the first signal so that late ones are
//! logged instead of killing the process mid-unpublish.

use std::sync::Arc;

use tokio::task::JoinHandle;

use minihap_app::shutdown::ShutdownCoordinator;
use minihap_domain::signal::ShutdownSignal;

/// Install `SIGINT` / `SIGTERM` handlers and spawn the forwarding task.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
#[cfg(unix)]
pub fn listen(coordinator: Arc<ShutdownCoordinator>) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};
    use tokio_stream::StreamExt;
    use tokio_stream::wrappers::SignalStream;

    let interrupt = SignalStream::new(signal(SignalKind::interrupt())?)
        .map(|()| ShutdownSignal::Interrupt);
    let terminate = SignalStream::new(signal(SignalKind::terminate())?)
        .map(|()| ShutdownSignal::Terminate);
    let mut signals = interrupt.merge(terminate);

    Ok(tokio::spawn(async move {
        while let Some(signal) = signals.next().await {
            coordinator.trigger(signal);
        }
    }))
}

/// Install a Ctrl-C handler and spawn the forwarding task.
///
/// # Errors
///
/// Never fails on this platform; the signature matches the Unix variant.
#[cfg(not(unix))]
pub fn listen(coordinator: Arc<ShutdownCoordinator>) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            coordinator.trigger(ShutdownSignal::Interrupt);
        }
    }))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;
    use std::time::Duration;

    fn send_sigterm_to_self() {
        let status = Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn should_record_first_sigterm_and_survive_the_second() {
        let coordinator = Arc::new(ShutdownCoordinator::new());
        let listener = listen(Arc::clone(&coordinator)).unwrap();

        send_sigterm_to_self();
        send_sigterm_to_self();
        let signal = tokio::time::timeout(Duration::from_secs(5), coordinator.wait())
            .await
            .unwrap();

        assert_eq!(signal, ShutdownSignal::Terminate);
        assert_eq!(signal.exit_code(), 143);
        assert_eq!(coordinator.signal(), Some(ShutdownSignal::Terminate));
        assert!(!listener.is_finished());
        listener.abort();
    }
}
