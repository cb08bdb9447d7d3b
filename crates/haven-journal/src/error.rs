use haven_storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("journal entry not found: {id}")]
    NotFound { id: String },

    /// The stored collection could not be read back. The stored value is
    /// left as it was.
    #[error("journal data under '{key}' is corrupt: {reason}")]
    PersistenceCorruption { key: String, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("timestamp out of range: {0}")]
    Timestamp(#[from] jiff::Error),
}

/// Two records in one collection share an id.
#[derive(Debug, Error)]
#[error("duplicate entry id: {0}")]
pub struct DuplicateId(pub String);
