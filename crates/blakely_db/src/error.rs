//! Error types for the database client

use blakely_common::BlakelyError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A stored value could not be decoded into the domain model
    #[error("Corrupt row in {table}: {message}")]
    CorruptRow { table: &'static str, message: String },

    /// The conditional slot-lock insert found an existing lock; nothing was written
    #[error("Slot already locked: {0}")]
    SlotTaken(String),
}

impl From<DbError> for BlakelyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::SlotTaken(slot_key) => {
                BlakelyError::ConflictError(format!("Slot already locked: {}", slot_key))
            }
            DbError::ConfigError(msg) | DbError::UrlError(msg) => BlakelyError::ConfigError(msg),
            other => BlakelyError::DatabaseError(other.to_string()),
        }
    }
}
