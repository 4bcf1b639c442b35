//! Shared data model: requests, signals, profiles, decisions, audit trail.

pub mod audit;
pub mod decision;
pub mod profile;
pub mod request;
pub mod signal;

pub use audit::AuditEvent;
pub use decision::{Decision, DecisionOutcome, RequestState};
pub use profile::AggregateRiskProfile;
pub use request::{OnboardingRequest, RequestId};
pub use signal::{
    Evidence, LegalStatus, ReliabilityRating, RiskFactor, RiskSignal, SignalKind, SignalRating,
};

/// Clamp a raw risk value into the valid [0.0, 1.0] score range.
/// NaN collapses to 0.0: an absent measurement, not a defect.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}
