//! The aggregate risk profile: full signal set plus the combined score.

use serde::{Deserialize, Serialize};

use super::signal::{RiskSignal, SignalKind};

/// All seven signals for one request, with the weighted combined score.
///
/// Built once by the aggregator after every signal has resolved (or been
/// substituted by the fallback policy); immutable afterwards. The combined
/// score is always recomputable from the signal set and the weight table;
/// no hidden state contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRiskProfile {
    pub signals: Vec<RiskSignal>,
    pub combined_score: f64,
}

impl AggregateRiskProfile {
    /// Look up a single signal by kind.
    pub fn signal(&self, kind: SignalKind) -> Option<&RiskSignal> {
        self.signals.iter().find(|s| s.kind == kind)
    }

    /// Score for a kind, or `None` when the signal is absent.
    pub fn score_of(&self, kind: SignalKind) -> Option<f64> {
        self.signal(kind).map(|s| s.score)
    }

    /// Signals substituted by the fallback policy.
    pub fn fallback_signals(&self) -> Vec<SignalKind> {
        self.signals
            .iter()
            .filter(|s| s.is_fallback())
            .map(|s| s.kind)
            .collect()
    }
}
