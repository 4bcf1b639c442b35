//! V001: Initial schema.
//! requests, signals, decisions, audit_trail.

pub const MIGRATION_SQL: &str = r#"
-- Onboarding requests. The state column is the only mutable cell in the
-- schema; everything else is append-only.
CREATE TABLE IF NOT EXISTS requests (
    request_id TEXT PRIMARY KEY,
    vendor_name TEXT NOT NULL,
    contact_email TEXT NOT NULL,
    business_description TEXT NOT NULL,
    tax_id TEXT NOT NULL,
    source_ip TEXT NOT NULL,
    submitted_at INTEGER NOT NULL,
    form_completion_secs INTEGER,
    state TEXT NOT NULL DEFAULT 'SUBMITTED'
) STRICT;

CREATE INDEX IF NOT EXISTS idx_requests_submitted
    ON requests(submitted_at DESC);
CREATE INDEX IF NOT EXISTS idx_requests_state
    ON requests(state);

-- Per-analyzer signals, one row per (request, kind).
CREATE TABLE IF NOT EXISTS signals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    request_id TEXT NOT NULL REFERENCES requests(request_id),
    kind TEXT NOT NULL,
    score REAL NOT NULL,
    factors_json TEXT NOT NULL,
    rating_json TEXT,
    created_at INTEGER NOT NULL,
    UNIQUE(request_id, kind)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_signals_request ON signals(request_id);

-- Terminal decisions, one per request.
CREATE TABLE IF NOT EXISTS decisions (
    request_id TEXT PRIMARY KEY REFERENCES requests(request_id),
    outcome TEXT NOT NULL,
    combined_score REAL NOT NULL,
    reason_codes_json TEXT NOT NULL,
    decided_at INTEGER NOT NULL
) STRICT;

-- Append-only audit log of lifecycle actions.
CREATE TABLE IF NOT EXISTS audit_trail (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    request_id TEXT NOT NULL,
    actor TEXT NOT NULL,
    action TEXT NOT NULL,
    timestamp INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_audit_request ON audit_trail(request_id);
"#;
