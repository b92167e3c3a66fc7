//! Codec error types.

use thiserror::Error;

/// Errors raised by the dump codec.
///
/// All variants are recoverable: the caller rejects the input and asks again.
/// No operation mutates a buffer before its inputs have been validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected dump size {actual} bytes: a 24C16 dump of {expected} bytes is expected")]
    InvalidDumpSize { expected: usize, actual: usize },

    #[error("no checksum seed: a dump must be decoded before an odometer checksum can be computed")]
    MissingChecksumSeed,

    #[error("odometer value {value} does not fit a signed 32-bit field after scaling by 10")]
    ValueOutOfRange { value: i64 },
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
