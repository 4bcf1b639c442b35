//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. `None` selects `veritas.db` under the root.
    pub db_path: Option<String>,
    /// Read-connection pool size. Default: 4.
    pub read_pool_size: Option<usize>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
}

impl StorageConfig {
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }

    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5000)
    }
}
