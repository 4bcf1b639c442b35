//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;
use veritas_core::config::StorageConfig;
use veritas_core::errors::StorageError;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Manages the single write connection and the read connection pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: ReadPool,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let busy_timeout = config.effective_busy_timeout_ms();
        let writer =
            Connection::open(path).map_err(|e| StorageError::Database(e.to_string()))?;
        apply_pragmas(&writer, busy_timeout)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, config.effective_read_pool_size(), busy_timeout)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    ///
    /// Uses a uniquely named shared-cache database so the read pool sees
    /// the writer's data.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        static NEXT_DB: AtomicU64 = AtomicU64::new(0);
        let uri = format!(
            "file:veritas-mem-{}?mode=memory&cache=shared",
            NEXT_DB.fetch_add(1, Ordering::Relaxed)
        );

        let writer =
            Connection::open(&uri).map_err(|e| StorageError::Database(e.to_string()))?;
        writer
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StorageError::Database(e.to_string()))?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open_uri(&uri, 1)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self
            .writer
            .lock()
            .map_err(|_| StorageError::Database("write lock poisoned".to_string()))?;
        f(&guard)
    }

    /// Execute a read operation with a pooled read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        self.readers.with_conn(f)
    }

    /// Run a WAL checkpoint (TRUNCATE mode).
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::Database(e.to_string()))
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
