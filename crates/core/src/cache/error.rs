use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// Callers of the cached repository never see these: every cache failure
/// degrades to the storage code path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
