//! Request lifecycle states and the terminal decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::AggregateRiskProfile;

/// Lifecycle of a request. Transitions are strictly forward:
/// Submitted → Analyzing → Scored → Decided. No state is ever skipped and
/// `Decided` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    Submitted,
    Analyzing,
    Scored,
    Decided,
}

impl RequestState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Analyzing => "ANALYZING",
            Self::Scored => "SCORED",
            Self::Decided => "DECIDED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SUBMITTED" => Some(Self::Submitted),
            "ANALYZING" => Some(Self::Analyzing),
            "SCORED" => Some(Self::Scored),
            "DECIDED" => Some(Self::Decided),
            _ => None,
        }
    }

    /// The only state legally reachable from `self`, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Submitted => Some(Self::Analyzing),
            Self::Analyzing => Some(Self::Scored),
            Self::Scored => Some(Self::Decided),
            Self::Decided => None,
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal outcome classifications, ordered by increasing risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    AutoApprove,
    StandardReview,
    EnhancedDueDiligence,
    ManualReview,
    Blocked,
}

impl DecisionOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AutoApprove => "AUTO_APPROVE",
            Self::StandardReview => "STANDARD_REVIEW",
            Self::EnhancedDueDiligence => "ENHANCED_DUE_DILIGENCE",
            Self::ManualReview => "MANUAL_REVIEW",
            Self::Blocked => "BLOCKED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AUTO_APPROVE" => Some(Self::AutoApprove),
            "STANDARD_REVIEW" => Some(Self::StandardReview),
            "ENHANCED_DUE_DILIGENCE" => Some(Self::EnhancedDueDiligence),
            "MANUAL_REVIEW" => Some(Self::ManualReview),
            "BLOCKED" => Some(Self::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The terminal decision for a request. Never revised in place; a re-scan
/// produces a new decision linked to a new request version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: DecisionOutcome,
    /// Stable snake_case reason codes explaining the outcome.
    pub reason_codes: Vec<String>,
    pub profile: AggregateRiskProfile,
    /// Unix seconds at decision time.
    pub decided_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_advance_without_skipping() {
        assert_eq!(RequestState::Submitted.next(), Some(RequestState::Analyzing));
        assert_eq!(RequestState::Analyzing.next(), Some(RequestState::Scored));
        assert_eq!(RequestState::Scored.next(), Some(RequestState::Decided));
        assert_eq!(RequestState::Decided.next(), None);
    }

    #[test]
    fn outcome_name_roundtrip() {
        for outcome in [
            DecisionOutcome::AutoApprove,
            DecisionOutcome::StandardReview,
            DecisionOutcome::EnhancedDueDiligence,
            DecisionOutcome::ManualReview,
            DecisionOutcome::Blocked,
        ] {
            assert_eq!(DecisionOutcome::from_name(outcome.name()), Some(outcome));
        }
    }
}
