//! Queries for the decisions table.
//!
//! The full signal set lives in the signals table, so a decision row only
//! carries the outcome, the combined score and the reason codes.

use rusqlite::{params, Connection, OptionalExtension};
use veritas_core::errors::StorageError;
use veritas_core::types::{Decision, DecisionOutcome, RequestId};

/// A decision as persisted. Rehydrate the signals separately when the
/// full profile is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDecision {
    pub outcome: DecisionOutcome,
    pub combined_score: f64,
    pub reason_codes: Vec<String>,
    pub decided_at: i64,
}

pub fn insert_decision(
    conn: &Connection,
    request_id: &RequestId,
    decision: &Decision,
) -> Result<(), StorageError> {
    let reason_codes_json = serde_json::to_string(&decision.reason_codes)
        .map_err(|e| StorageError::Database(format!("serialize reason codes: {e}")))?;
    conn.execute(
        "INSERT INTO decisions (request_id, outcome, combined_score,
            reason_codes_json, decided_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            request_id.as_str(),
            decision.outcome.name(),
            decision.profile.combined_score,
            reason_codes_json,
            decision.decided_at,
        ],
    )
    .map_err(|e| StorageError::Database(e.to_string()))?;
    Ok(())
}

/// Fetch the decision for a request, if one has been reached.
pub fn get_decision(
    conn: &Connection,
    request_id: &RequestId,
) -> Result<Option<StoredDecision>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT outcome, combined_score, reason_codes_json, decided_at
             FROM decisions WHERE request_id = ?1",
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let row = stmt
        .query_row(params![request_id.as_str()], |row| {
            let outcome: String = row.get(0)?;
            let combined_score: f64 = row.get(1)?;
            let reason_codes_json: String = row.get(2)?;
            let decided_at: i64 = row.get(3)?;
            Ok((outcome, combined_score, reason_codes_json, decided_at))
        })
        .optional()
        .map_err(|e| StorageError::Database(e.to_string()))?;

    let Some((outcome_name, combined_score, reason_codes_json, decided_at)) = row else {
        return Ok(None);
    };
    let outcome =
        DecisionOutcome::from_name(&outcome_name).ok_or_else(|| StorageError::CorruptRow {
            entity: "decisions.outcome".to_string(),
            message: format!("unknown outcome {outcome_name}"),
        })?;
    let reason_codes =
        serde_json::from_str(&reason_codes_json).map_err(|e| StorageError::CorruptRow {
            entity: "decisions.reason_codes_json".to_string(),
            message: e.to_string(),
        })?;
    Ok(Some(StoredDecision {
        outcome,
        combined_score,
        reason_codes,
        decided_at,
    }))
}
