//! Connection pragmas.

use rusqlite::Connection;
use veritas_core::errors::StorageError;

/// Pragmas for the write connection: WAL journaling, normal sync, and a
/// busy timeout so a momentary reader never bubbles up as SQLITE_BUSY.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {busy_timeout_ms};"
    ))
    .map_err(|e| StorageError::Database(e.to_string()))
}

/// Pragmas for pooled read connections.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "PRAGMA query_only = ON;
         PRAGMA busy_timeout = {busy_timeout_ms};"
    ))
    .map_err(|e| StorageError::Database(e.to_string()))
}
