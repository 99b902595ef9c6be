use thiserror::Error;

/// Errors related to the core functionality of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors raised while writing the persisted collection.
///
/// Reads never produce one of these: an unreadable or malformed slot is
/// reported through [`LoadStatus::EmptyOnCorruption`](crate::LoadStatus).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored data could not be serialized: {0}")]
    Serialization(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("validity window of {0} minutes is out of range")]
    ValidityOutOfRange(i64),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
