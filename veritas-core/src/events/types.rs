//! Event payload types for the onboarding pipeline.

use crate::types::{DecisionOutcome, RequestState, SignalKind};

/// Payload for `on_state_changed`.
#[derive(Debug, Clone)]
pub struct StateChangedEvent {
    pub request_id: String,
    pub from: RequestState,
    pub to: RequestState,
}

/// Payload for `on_signal_scored`.
#[derive(Debug, Clone)]
pub struct SignalScoredEvent {
    pub request_id: String,
    pub kind: SignalKind,
    pub score: f64,
    pub factor_count: usize,
}

/// Payload for `on_analyzer_fallback`.
#[derive(Debug, Clone)]
pub struct AnalyzerFallbackEvent {
    pub request_id: String,
    pub kind: SignalKind,
    pub error_code: String,
    pub message: String,
}

/// Payload for `on_decision_reached`.
#[derive(Debug, Clone)]
pub struct DecisionReachedEvent {
    pub request_id: String,
    pub outcome: DecisionOutcome,
    pub combined_score: f64,
    pub reason_codes: Vec<String>,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
