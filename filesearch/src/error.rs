//! Error types for File Search

use std::path::PathBuf;
use thiserror::Error;

/// File Search error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File could not be accessed or read.
    ///
    /// Covers both the accessibility check and the content read; only the
    /// underlying io error text tells them apart.
    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        /// Resolved path that was attempted
        path: PathBuf,
        /// Underlying io failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The stdio transport failed
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for File Search operations
pub type Result<T> = std::result::Result<T, Error>;
