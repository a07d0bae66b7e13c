//! Error types for the mark store module.

use thiserror::Error;

/// Errors that can occur when interacting with the mark store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// SQL query execution failed
    #[error("Query error: {0}")]
    Query(String),

    /// A record with the same payload already exists
    #[error("Duplicate payload: {0}")]
    DuplicatePayload(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Query(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(e.to_string())
    }
}
