//! Queries for the signals table.

use rusqlite::{params, Connection};
use veritas_core::errors::StorageError;
use veritas_core::types::{RequestId, RiskSignal, SignalKind};

/// Insert one signal row. Factors and rating are stored as JSON.
pub fn insert_signal(
    conn: &Connection,
    request_id: &RequestId,
    signal: &RiskSignal,
    created_at: i64,
) -> Result<(), StorageError> {
    let factors_json = serde_json::to_string(&signal.factors)
        .map_err(|e| StorageError::Database(format!("serialize factors: {e}")))?;
    let rating_json = signal
        .rating
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| StorageError::Database(format!("serialize rating: {e}")))?;
    conn.execute(
        "INSERT INTO signals (request_id, kind, score, factors_json, rating_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            request_id.as_str(),
            signal.kind.name(),
            signal.score,
            factors_json,
            rating_json,
            created_at,
        ],
    )
    .map_err(|e| StorageError::Database(e.to_string()))?;
    Ok(())
}

/// All signals for a request, in canonical kind order.
pub fn query_signals(
    conn: &Connection,
    request_id: &RequestId,
) -> Result<Vec<RiskSignal>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, score, factors_json, rating_json
             FROM signals WHERE request_id = ?1",
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let rows = stmt
        .query_map(params![request_id.as_str()], |row| {
            let kind: String = row.get(0)?;
            let score: f64 = row.get(1)?;
            let factors_json: String = row.get(2)?;
            let rating_json: Option<String> = row.get(3)?;
            Ok((kind, score, factors_json, rating_json))
        })
        .map_err(|e| StorageError::Database(e.to_string()))?;

    let mut signals = Vec::new();
    for row in rows {
        let (kind_name, score, factors_json, rating_json) =
            row.map_err(|e| StorageError::Database(e.to_string()))?;
        let kind = SignalKind::from_name(&kind_name).ok_or_else(|| StorageError::CorruptRow {
            entity: "signals.kind".to_string(),
            message: format!("unknown kind {kind_name}"),
        })?;
        let factors =
            serde_json::from_str(&factors_json).map_err(|e| StorageError::CorruptRow {
                entity: "signals.factors_json".to_string(),
                message: e.to_string(),
            })?;
        let mut signal = RiskSignal::new(kind, score, factors);
        if let Some(json) = rating_json {
            signal.rating =
                Some(serde_json::from_str(&json).map_err(|e| StorageError::CorruptRow {
                    entity: "signals.rating_json".to_string(),
                    message: e.to_string(),
                })?);
        }
        signals.push(signal);
    }
    signals.sort_by_key(|s| SignalKind::ALL.iter().position(|&k| k == s.kind));
    Ok(signals)
}
