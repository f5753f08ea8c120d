//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode an item payload.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode an item payload.
    #[error("decoding failed: {message}")]
    DecodingFailed {
        /// Description of the decoding error.
        message: String,
    },

    /// The stream ended before the slot count prefix.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The slot count prefix is not a valid length.
    #[error("invalid slot count: {count}")]
    InvalidCount {
        /// The count read from the stream.
        count: i32,
    },

    /// A slot array is too long to be described by the count prefix.
    #[error("too many slots to encode: {len}")]
    TooManySlots {
        /// Number of slots handed to the encoder.
        len: usize,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            message: message.into(),
        }
    }
}
