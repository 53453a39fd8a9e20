//! Unified error type for taskdeck.
//!
//! Uses `thiserror` so the storage and API layers share one error chain.

use std::io;
use thiserror::Error;

/// Taskdeck error type
#[derive(Debug, Error)]
pub enum TaskdeckError {
    /// Invalid input (missing title, unknown status, malformed date)
    #[error("{0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// SQLite error
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error (database directory creation etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage error (generic)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Taskdeck Result type alias
pub type Result<T> = std::result::Result<T, TaskdeckError>;

impl TaskdeckError {
    /// Create a Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a NotFound error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a Storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskdeckError::validation("title is required");
        assert_eq!(err.to_string(), "title is required");

        let err = TaskdeckError::not_found("task 42");
        assert_eq!(err.to_string(), "Not found: task 42");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TaskdeckError = io_err.into();
        assert!(matches!(err, TaskdeckError::Io(_)));
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let err: TaskdeckError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, TaskdeckError::Sqlite(_)));
    }
}
