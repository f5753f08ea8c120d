//! Error types for storage operations.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The database rejected a statement or the connection failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored slot blob could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] echest_codec::CodecError),

    /// A record file is not a valid document.
    #[error("malformed record document: {0}")]
    Document(#[from] serde_json::Error),

    /// The connection URI names a database this backend cannot open.
    #[error("unsupported connection URI: {uri}")]
    UnsupportedUri {
        /// The URI as configured.
        uri: String,
    },

    /// A relational backend was requested without a connection URI.
    #[error("no connection URI configured")]
    MissingUri,
}

impl StorageError {
    /// Creates an unsupported URI error.
    pub fn unsupported_uri(uri: impl Into<String>) -> Self {
        Self::UnsupportedUri { uri: uri.into() }
    }

    /// Classifies this error for logging.
    #[must_use]
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Io(_) => FailureClass::Io,
            Self::Sqlite(_) | Self::UnsupportedUri { .. } | Self::MissingUri => {
                FailureClass::Connectivity
            }
            Self::Codec(_) | Self::Document(_) => FailureClass::Decode,
        }
    }
}

/// Coarse failure categories shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// File read or write failed.
    Io,
    /// Database connection or query failed.
    Connectivity,
    /// Stored data could not be decoded.
    Decode,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Io => "io",
            Self::Connectivity => "connectivity",
            Self::Decode => "decode",
        })
    }
}
