//! Database error types.
//!
//! Provides comprehensive error handling for database operations using `thiserror`.

use thiserror::Error;

/// Database-specific errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open or create database connection.
    #[error("failed to open database: {0}")]
    Open(String),

    /// Migration execution failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Insert could not be completed within the bounded retry budget.
    #[error("insert failed after {attempts} attempts: {reason}")]
    InsertRetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error observed
        reason: String,
    },

    /// Requested record was not found.
    #[error("record not found")]
    NotFound,

    /// Failed to decode database value.
    #[error("decode error: {0}")]
    Decode(String),

    /// Underlying `SQLx` error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
