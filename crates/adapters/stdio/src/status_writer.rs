//! JSON-line status sink.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use minihap_app::ports::StatusSink;
use minihap_domain::status::PowerStatus;

use crate::error::StdioError;

/// Writes each [`PowerStatus`] as a single JSON line and flushes.
pub struct JsonLineStatusSink<W> {
    writer: Mutex<W>,
}

impl JsonLineStatusSink<std::io::Stdout> {
    /// Sink writing to the process standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonLineStatusSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one record.
    ///
    /// # Errors
    ///
    /// Returns [`StdioError`] when serializing or writing fails.
    pub fn write_status(&self, status: PowerStatus) -> Result<(), StdioError> {
        let mut line = serde_json::to_vec(&status).map_err(StdioError::Serialize)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line).map_err(StdioError::Write)?;
        writer.flush().map_err(StdioError::Write)
    }
}

impl<W: Write + Send> StatusSink for JsonLineStatusSink<W> {
    fn emit(&self, status: PowerStatus) {
        if let Err(err) = self.write_status(status) {
            tracing::warn!(error = %err, id = status.id, power = status.power, "status record dropped");
        }
    }
}
