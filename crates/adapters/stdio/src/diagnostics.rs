//! Diagnostic side channel — JSON documents, one per line.
//!
//! Anything a parent process writes here is logged. Malformed input is not an
//! error for the accessory: it is reported and skipped, whether it is broken
//! JSON or not text at all.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::SplitStream;

use crate::error::{ParseError, StdioError};

/// Counters returned once the diagnostic stream is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Parse a single diagnostic line.
///
/// # Errors
///
/// Returns [`ParseError`] when the line is not a JSON document.
pub fn parse_line(line: &str) -> Result<serde_json::Value, ParseError> {
    serde_json::from_str(line).map_err(|source| ParseError::Json {
        line: line.to_string(),
        source,
    })
}

/// Decode one raw line (without its `\n`) and parse it.
///
/// A trailing `\r` is dropped. `Ok(None)` means the line is blank.
fn parse_raw_line(mut raw: Vec<u8>) -> Result<Option<serde_json::Value>, ParseError> {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    let line = String::from_utf8(raw).map_err(ParseError::Encoding)?;
    if line.trim().is_empty() {
        return Ok(None);
    }
    parse_line(&line).map(Some)
}

/// Read `reader` to the end, logging every line.
///
/// Blank lines are ignored. Lines that are not UTF-8 are rejected like any
/// other malformed input and reading goes on.
///
/// # Errors
///
/// Returns [`StdioError::Read`] only when the stream itself fails; parse
/// failures are counted in [`DiagnosticSummary::rejected`].
pub async fn read_diagnostics<R>(reader: R) -> Result<DiagnosticSummary, StdioError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = SplitStream::new(reader.split(b'\n'));
    let mut summary = DiagnosticSummary::default();

    while let Some(raw) = lines.next().await {
        let raw = raw.map_err(StdioError::Read)?;
        match parse_raw_line(raw) {
            Ok(None) => {}
            Ok(Some(value)) => {
                summary.accepted += 1;
                tracing::info!(%value, "diagnostic input");
            }
            Err(err) => {
                summary.rejected += 1;
                tracing::warn!(error = %err, "ignoring diagnostic input");
            }
        }
    }

    tracing::debug!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "diagnostic stream closed"
    );
    Ok(summary)
}

/// Read the process standard input as a diagnostic stream.
///
/// # Errors
///
/// See [`read_diagnostics`].
pub async fn read_stdin_diagnostics() -> Result<DiagnosticSummary, StdioError> {
    read_diagnostics(BufReader::new(tokio::io::stdin())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_json_object() {
        let value = parse_line(r#"{"power":true}"#).unwrap();
        assert_eq!(value, serde_json::json!({"power": true}));
    }

    #[test]
    fn should_parse_json_scalar() {
        assert_eq!(parse_line("42").unwrap(), serde_json::json!(42));
    }

    #[test]
    fn should_keep_offending_line_in_parse_error() {
        let err = parse_line("not json").unwrap_err();
        assert!(matches!(err, ParseError::Json { ref line, .. } if line == "not json"));
    }

    #[tokio::test]
    async fn should_skip_invalid_utf8_line() {
        let input: &[u8] = b"{\"a\":1}\n\xff\xfe garbage\n{\"b\":2}\n";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(
            summary,
            DiagnosticSummary {
                accepted: 2,
                rejected: 1
            }
        );
    }

    #[tokio::test]
    async fn should_accept_crlf_line_endings() {
        let input: &[u8] = b"{\"a\":1}\r\n\r\n[true]\r\n";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 0);
    }

    #[tokio::test]
    async fn should_count_accepted_and_rejected_lines() {
        let input: &[u8] = b"{\"a\":1}\nnope\n[1,2]\n{broken\n";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(
            summary,
            DiagnosticSummary {
                accepted: 2,
                rejected: 2
            }
        );
    }

    #[tokio::test]
    async fn should_skip_blank_lines() {
        let input: &[u8] = b"\n   \n{\"a\":1}\n\n";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 0);
    }

    #[tokio::test]
    async fn should_handle_last_line_without_newline() {
        let input: &[u8] = b"{\"a\":1}\n{\"b\":2}";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(summary.accepted, 2);
    }

    #[tokio::test]
    async fn should_return_empty_summary_for_empty_stream() {
        let input: &[u8] = b"";
        let summary = read_diagnostics(input).await.unwrap();
        assert_eq!(summary, DiagnosticSummary::default());
    }
}
