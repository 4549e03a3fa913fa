//! Attendance error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised by attendance rules
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// No card registered under this number
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// No card with this id
    #[error("Card with id {0} not found")]
    CardIdNotFound(i64),

    /// Card number is empty or malformed
    #[error("Invalid card number: {0:?}")]
    InvalidCardNumber(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for attendance operations
pub type AttendanceResult<T> = Result<T, AttendanceError>;
