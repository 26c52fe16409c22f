use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Load/save failures. Surfaced to the caller as-is; nothing here retries.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
