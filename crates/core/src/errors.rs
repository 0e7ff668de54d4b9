//! Core error types for Wariflex.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (file I/O, JSON, ...) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the splitting core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Failures of the apportionment arithmetic.
///
/// `InvalidAmount`, `EmptyParticipantSet` and `ZeroPercentageSum` are caller
/// errors. `AllocationInconsistency` means an internal invariant broke and the
/// computed breakdown must not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Participant set is empty")]
    EmptyParticipantSet,

    #[error("Sum of participant percentages is zero")]
    ZeroPercentageSum,

    #[error("Percentage {value} for participant '{participant_id}' is outside [0, 100]")]
    PercentageOutOfRange {
        participant_id: String,
        value: String,
    },

    #[error("Allocation inconsistency: remainder {remainder} outside [0, {count}]")]
    AllocationInconsistency { remainder: i128, count: usize },
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid status transition: {0}")]
    InvalidStatusTransition(String),
}

/// Storage-agnostic error type for repository operations.
///
/// Uses `String` for details so that every storage backend can map into it.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A read or write against the store failed.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Internal/unexpected storage error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
