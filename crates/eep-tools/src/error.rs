//! Tool error types.

use eep_codec::CodecError;
use thiserror::Error;

/// Errors that can occur while loading, inspecting or writing dumps.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("dump not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not a .bin dump: {0}")]
    InvalidExtension(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for tool results.
pub type ToolOutcome<T> = Result<T, ToolError>;
