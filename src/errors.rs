use thiserror::Error;

/// Failure signal raised by record stores when the backing file cannot be
/// written or read for reasons other than absence or corruption.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Field separator must not be empty")]
    InvalidSeparator,
}

pub type StoreResult<T> = Result<T, StoreError>;
