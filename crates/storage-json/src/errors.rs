//! Storage-specific error types for the JSON file store.
//!
//! These errors are internal to the storage layer and are converted to
//! `wariflex_core::Error` before being returned to callers.

use thiserror::Error;
use wariflex_core::errors::{DatabaseError, Error};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::Serialization(e) => {
                Error::Database(DatabaseError::Internal(e.to_string()))
            }
            StorageError::UnsupportedVersion { found, expected } => Error::Database(
                DatabaseError::Internal(format!(
                    "store version {} is not supported (expected {})",
                    found, expected
                )),
            ),
            StorageError::LockPoisoned => {
                Error::Database(DatabaseError::Internal("store lock poisoned".to_string()))
            }
        }
    }
}
