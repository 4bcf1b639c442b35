//! Queries for the append-only audit trail.

use rusqlite::{params, Connection};
use veritas_core::errors::StorageError;
use veritas_core::types::{AuditEvent, RequestId};

pub fn append_audit(
    conn: &Connection,
    request_id: &RequestId,
    event: &AuditEvent,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO audit_trail (request_id, actor, action, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            request_id.as_str(),
            event.actor,
            event.action,
            event.timestamp,
        ],
    )
    .map_err(|e| StorageError::Database(e.to_string()))?;
    Ok(())
}

/// All audit entries for a request in insertion order.
pub fn query_audit(
    conn: &Connection,
    request_id: &RequestId,
) -> Result<Vec<AuditEvent>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT actor, action, timestamp FROM audit_trail
             WHERE request_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let rows = stmt
        .query_map(params![request_id.as_str()], |row| {
            Ok(AuditEvent {
                actor: row.get(0)?,
                action: row.get(1)?,
                timestamp: row.get(2)?,
            })
        })
        .map_err(|e| StorageError::Database(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::Database(e.to_string()))
}
