//! Error types for LastGet
//!
//! Provides a unified error type for all operations.
//!
//! Protocol-level failures (bad request, not found, internal) are not errors
//! here: they travel as ordinary `ERR` responses and the connection stays open.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using LastGetError
pub type Result<T> = std::result::Result<T, LastGetError>;

/// Unified error type for LastGet operations
#[derive(Debug, Error)]
pub enum LastGetError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Incomplete line: stream ended after {received} bytes without a newline")]
    IncompleteLine { received: usize },

    #[error("Line too long: no newline within {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Truncated body (wanted {remaining} more bytes)")]
    Truncated { remaining: u64 },

    #[error("Unknown response: {0}")]
    UnknownResponse(String),

    #[error("Empty/closed response")]
    NoResponse,

    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Failed reading {}: {source}", .path.display())]
    ResourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource {} shrank while streaming ({remaining} bytes short)", .path.display())]
    ResourceShrank { path: PathBuf, remaining: u64 },

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LastGetError {
    /// Whether this error means the peer went away rather than misbehaved.
    pub fn is_disconnect(&self) -> bool {
        match self {
            LastGetError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }

    /// Whether the stream can still carry another exchange after this error.
    ///
    /// A malformed or unknown header has been consumed whole, so the next
    /// response starts cleanly. Anything that ended or desynchronised the
    /// stream cannot be recovered.
    pub fn leaves_stream_usable(&self) -> bool {
        matches!(
            self,
            LastGetError::MalformedHeader(_)
                | LastGetError::UnknownResponse(_)
                | LastGetError::InvalidArgument(_)
        )
    }
}
