//! Termination signals and the exit codes derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A process signal that starts a graceful shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShutdownSignal {
    /// `SIGINT`, usually Ctrl-C.
    Interrupt,
    /// `SIGTERM`, sent by service managers.
    Terminate,
}

impl ShutdownSignal {
    /// Every signal the daemon listens for.
    pub const ALL: [Self; 2] = [Self::Interrupt, Self::Terminate];

    /// Conventional signal number.
    #[must_use]
    pub fn number(self) -> i32 {
        match self {
            Self::Interrupt => 2,
            Self::Terminate => 15,
        }
    }

    /// Process exit code following the `128 + signal` convention.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        128 + self.number()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_exit_with_130_on_interrupt() {
        assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
    }

    #[test]
    fn should_exit_with_143_on_terminate() {
        assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
    }

    #[test]
    fn should_display_posix_name() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
