//! Queries for the requests table.

use rusqlite::{params, Connection, OptionalExtension};
use veritas_core::errors::StorageError;
use veritas_core::types::{OnboardingRequest, RequestId, RequestState};

/// Insert a freshly submitted request (state = SUBMITTED).
pub fn insert_request(conn: &Connection, request: &OnboardingRequest) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO requests (request_id, vendor_name, contact_email,
            business_description, tax_id, source_ip, submitted_at,
            form_completion_secs)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            request.request_id.as_str(),
            request.vendor_name,
            request.contact_email,
            request.business_description,
            request.tax_id,
            request.source_ip,
            request.submitted_at,
            request.form_completion_secs,
        ],
    )
    .map_err(|e| StorageError::Database(e.to_string()))?;
    Ok(())
}

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<OnboardingRequest> {
    Ok(OnboardingRequest {
        request_id: RequestId::from_string(row.get::<_, String>(0)?),
        vendor_name: row.get(1)?,
        contact_email: row.get(2)?,
        business_description: row.get(3)?,
        tax_id: row.get(4)?,
        source_ip: row.get(5)?,
        submitted_at: row.get(6)?,
        form_completion_secs: row.get(7)?,
    })
}

const REQUEST_COLUMNS: &str = "request_id, vendor_name, contact_email, \
    business_description, tax_id, source_ip, submitted_at, form_completion_secs";

/// Fetch one request by id.
pub fn get_request(
    conn: &Connection,
    request_id: &RequestId,
) -> Result<OnboardingRequest, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE request_id = ?1"
        ))
        .map_err(|e| StorageError::Database(e.to_string()))?;
    stmt.query_row(params![request_id.as_str()], row_to_request)
        .optional()
        .map_err(|e| StorageError::Database(e.to_string()))?
        .ok_or_else(|| StorageError::RequestNotFound(request_id.to_string()))
}

/// Requests submitted within `window_secs` before `now`, newest first.
pub fn query_recent(
    conn: &Connection,
    now: i64,
    window_secs: i64,
    limit: u32,
) -> Result<Vec<OnboardingRequest>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests
             WHERE submitted_at > ?1 AND submitted_at <= ?2
             ORDER BY submitted_at DESC LIMIT ?3"
        ))
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let rows = stmt
        .query_map(params![now - window_secs, now, limit], row_to_request)
        .map_err(|e| StorageError::Database(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::Database(e.to_string()))
}

/// Current lifecycle state of a request.
pub fn get_state(conn: &Connection, request_id: &RequestId) -> Result<RequestState, StorageError> {
    let name: Option<String> = conn
        .query_row(
            "SELECT state FROM requests WHERE request_id = ?1",
            params![request_id.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Database(e.to_string()))?;
    let name = name.ok_or_else(|| StorageError::RequestNotFound(request_id.to_string()))?;
    RequestState::from_name(&name).ok_or_else(|| StorageError::CorruptRow {
        entity: "requests.state".to_string(),
        message: format!("unknown state {name}"),
    })
}

/// Advance the state column.
pub fn update_state(
    conn: &Connection,
    request_id: &RequestId,
    state: RequestState,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE requests SET state = ?1 WHERE request_id = ?2",
            params![state.name(), request_id.as_str()],
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;
    if updated == 0 {
        return Err(StorageError::RequestNotFound(request_id.to_string()));
    }
    Ok(())
}
