//! Error types for the quiz store.

use thiserror::Error;

/// Errors that can occur while reading or writing the quiz database
#[derive(Error, Debug)]
pub enum StoreError {
    /// Any failure reported by SQLite (open, query, constraint, ...)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking holder
    #[error("Database connection lock poisoned")]
    LockPoisoned,

    /// `create_user` with a username that is already taken
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Subjects and category names must contain something besides spaces
    #[error("Category name must not be empty")]
    EmptyName,

    /// Question objects could not be encoded or a stored blob could not be decoded
    #[error("Failed to serialize questions: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
