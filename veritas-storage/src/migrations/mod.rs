//! Versioned migrations tracked in schema_migrations.

pub mod v001_initial;

use rusqlite::Connection;
use veritas_core::errors::StorageError;

use crate::connection::writer::with_immediate_transaction;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Apply all pending migrations, in order, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    apply(conn, MIGRATIONS)
}

fn apply(conn: &Connection, migrations: &[(u32, &str)]) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        ) STRICT;",
    )
    .map_err(|e| StorageError::Database(e.to_string()))?;

    for &(version, sql) in migrations {
        let applied: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::Database(e.to_string()))?;
        if applied {
            continue;
        }

        tracing::debug!(version, "applying migration");
        // DDL and the version row commit together or not at all.
        with_immediate_transaction(conn, |tx| {
            tx.execute_batch(sql).map_err(|e| StorageError::Migration {
                version,
                message: e.to_string(),
            })?;
            tx.execute(
                "INSERT INTO schema_migrations (version) VALUES (?1)",
                [version],
            )
            .map_err(|e| StorageError::Migration {
                version,
                message: e.to_string(),
            })?;
            Ok(())
        })?;
    }
    Ok(())
}

/// Highest applied migration version, 0 when none.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::Database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), 1);
    }

    #[test]
    fn failed_migration_rolls_back_its_ddl_and_version_row() {
        let conn = Connection::open_in_memory().unwrap();
        let bad = [(
            1u32,
            "CREATE TABLE half_applied (id INTEGER PRIMARY KEY) STRICT; not sql;",
        )];

        let err = apply(&conn, &bad).unwrap_err();
        assert!(matches!(err, StorageError::Migration { version: 1, .. }));
        assert_eq!(current_version(&conn).unwrap(), 0);

        let leaked: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = 'half_applied')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(!leaked);
    }
}
