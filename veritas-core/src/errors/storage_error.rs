//! Storage errors.

use super::error_code::{self, VeritasErrorCode};

/// Errors raised by the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration failed at version {version}: {message}")]
    Migration { version: u32, message: String },

    #[error("Request not found: {0}")]
    RequestNotFound(String),

    #[error("Corrupt stored row for {entity}: {message}")]
    CorruptRow { entity: String, message: String },

    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl VeritasErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
