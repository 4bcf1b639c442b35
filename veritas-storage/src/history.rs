//! HistoryStore backed by the requests table.

use std::sync::Arc;

use veritas_core::errors::LookupError;
use veritas_core::traits::HistoryStore;
use veritas_core::types::OnboardingRequest;

use crate::connection::DatabaseManager;
use crate::queries::requests;

/// Serves recent-request lookups to the network and behavioral analyzers
/// from a pooled read connection.
pub struct SqliteHistoryStore {
    db: Arc<DatabaseManager>,
}

impl SqliteHistoryStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn recent_requests(
        &self,
        now: i64,
        window_secs: i64,
        limit: u32,
    ) -> Result<Vec<OnboardingRequest>, LookupError> {
        self.db
            .with_reader(|conn| requests::query_recent(conn, now, window_secs, limit))
            .map_err(|e| LookupError::HistoryUnavailable(e.to_string()))
    }
}
