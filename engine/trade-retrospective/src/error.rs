//! Error types for snapshot storage

use thiserror::Error;

/// Result type alias for snapshot store operations
pub type Result<T> = std::result::Result<T, SnapshotStoreError>;

/// Errors that can occur while reading or writing trade snapshots
#[derive(Error, Debug)]
pub enum SnapshotStoreError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored record does not match the requested key
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Store refused the operation
    #[error("Snapshot store unavailable: {0}")]
    Unavailable(String),
}

impl SnapshotStoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
