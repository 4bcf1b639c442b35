//! Decision threshold bands.

use serde::{Deserialize, Serialize};

use crate::types::DecisionOutcome;

/// Combined-score bands mapping to decision outcomes.
///
/// Bands are lower-inclusive. Effective values must be strictly ascending
/// within (0, 1); `VeritasConfig::validate` enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecisionThresholds {
    /// Scores at or above this leave AUTO_APPROVE. Default: 0.30.
    pub standard_review: Option<f64>,
    /// Default: 0.50.
    pub enhanced_due_diligence: Option<f64>,
    /// Default: 0.70.
    pub manual_review: Option<f64>,
    /// Default: 0.80.
    pub blocked: Option<f64>,
}

impl DecisionThresholds {
    pub fn effective_standard_review(&self) -> f64 {
        self.standard_review.unwrap_or(0.30)
    }

    pub fn effective_enhanced_due_diligence(&self) -> f64 {
        self.enhanced_due_diligence.unwrap_or(0.50)
    }

    pub fn effective_manual_review(&self) -> f64 {
        self.manual_review.unwrap_or(0.70)
    }

    pub fn effective_blocked(&self) -> f64 {
        self.blocked.unwrap_or(0.80)
    }

    /// Map a combined score onto its outcome band.
    pub fn classify(&self, combined_score: f64) -> DecisionOutcome {
        if combined_score >= self.effective_blocked() {
            DecisionOutcome::Blocked
        } else if combined_score >= self.effective_manual_review() {
            DecisionOutcome::ManualReview
        } else if combined_score >= self.effective_enhanced_due_diligence() {
            DecisionOutcome::EnhancedDueDiligence
        } else if combined_score >= self.effective_standard_review() {
            DecisionOutcome::StandardReview
        } else {
            DecisionOutcome::AutoApprove
        }
    }
}
