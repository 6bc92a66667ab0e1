//! # minihap-adapter-stdio
//!
//! Standard stream adapter.
//!
//! ## Responsibilities
//! - [`JsonLineStatusSink`] writes one `{"id":…,"power":…}` line per power
//!   change, so a parent process can follow the outlet on stdout
//! - [`read_diagnostics`] consumes JSON documents line by line from stdin and
//!   logs them; malformed lines are reported and skipped
//!
//! Logs go through `tracing` (stderr), never stdout, so the status stream
//! stays machine readable.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `minihap-app` and `minihap-domain`.

mod diagnostics;
mod error;
mod status_writer;

pub use diagnostics::{DiagnosticSummary, parse_line, read_diagnostics, read_stdin_diagnostics};
pub use error::{ParseError, StdioError};
pub use status_writer::JsonLineStatusSink;
