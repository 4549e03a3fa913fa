//! Storage error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the attendance store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite statement or connection failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Migration("version 2 failed".to_string());
        assert_eq!(err.to_string(), "Migration error: version 2 failed");

        let err = StorageError::Lock("poisoned".to_string());
        assert_eq!(err.to_string(), "Lock error: poisoned");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let storage_err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(storage_err, StorageError::Database(_)));
    }
}
