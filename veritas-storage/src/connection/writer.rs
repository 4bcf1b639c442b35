//! Write connection utilities: BEGIN IMMEDIATE transactions.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use veritas_core::errors::StorageError;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// Immediate acquires the write lock at transaction start, preventing
/// SQLITE_BUSY upgrades mid-transaction. Dropping the transaction
/// without committing rolls it back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| StorageError::Database(format!("begin immediate: {e}")))?;

    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| StorageError::Database(format!("commit: {e}")))?;

    Ok(result)
}
