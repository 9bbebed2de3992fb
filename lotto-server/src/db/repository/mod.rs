//! Repository Module
//!
//! Free async functions over SQLite. Single-statement reads accept any
//! executor (`&SqlitePool` or `&mut **tx`) so the day-close orchestrator can
//! run them inside its transaction; multi-statement writes open their own.

// Store & catalog
pub mod game;
pub mod store;

// Inventory
pub mod bin;
pub mod pack;

// Shift ledger
pub mod shift;
pub mod shift_closing;
pub mod shift_opening;

// Day close
pub mod business_day;
pub mod day_pack;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
