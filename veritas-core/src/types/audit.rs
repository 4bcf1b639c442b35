//! Append-only audit trail entries recording lifecycle transitions.

use serde::{Deserialize, Serialize};

/// One audit entry: who did what, when. Written by the lifecycle
/// controller, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Contact email for requester actions, `"system"` for pipeline actions.
    pub actor: String,
    /// Stable action name (`SUBMITTED`, `ANALYSIS_STARTED`, `RISK_SCORED`,
    /// `ANALYZER_FALLBACK_<signal>`, `DECIDED_<outcome>`).
    pub action: String,
    /// Unix seconds.
    pub timestamp: i64,
}

impl AuditEvent {
    pub fn system(action: impl Into<String>, timestamp: i64) -> Self {
        Self {
            actor: "system".to_string(),
            action: action.into(),
            timestamp,
        }
    }

    pub fn requester(actor: impl Into<String>, action: impl Into<String>, timestamp: i64) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            timestamp,
        }
    }
}
