//! Stdio adapter error types.

/// A diagnostic line that could not be understood.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The line is text but not a JSON document.
    #[error("can't parse diagnostic input {line:?}")]
    Json {
        /// The offending line, as received.
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// The line is not UTF-8 text.
    #[error("diagnostic input is not valid UTF-8 ({} bytes)", .0.as_bytes().len())]
    Encoding(#[source] std::string::FromUtf8Error),
}

/// Errors specific to the stdio adapter.
#[derive(Debug, thiserror::Error)]
pub enum StdioError {
    /// Reading the diagnostic stream failed.
    #[error("failed to read diagnostic stream")]
    Read(#[source] std::io::Error),

    /// Writing a status record failed.
    #[error("failed to write status record")]
    Write(#[source] std::io::Error),

    /// Serializing a status record failed.
    #[error("failed to serialize status record")]
    Serialize(#[source] serde_json::Error),
}
