use thiserror::Error;

/// Result type for credential store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store serialization failed: {0}")]
    Serialization(String),
    #[error("stored value is invalid: {0}")]
    InvalidData(String),
    #[error("store i/o failed: {0}")]
    Io(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}
