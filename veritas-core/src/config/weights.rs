//! Aggregation weight table.

use serde::{Deserialize, Serialize};

use crate::types::SignalKind;

/// Per-signal aggregation weights.
///
/// Effective values must sum to exactly 1.0; `VeritasConfig::validate`
/// rejects any override set that breaks the sum.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignalWeights {
    /// Default: 0.15.
    pub network: Option<f64>,
    /// Default: 0.30.
    pub entity: Option<f64>,
    /// Default: 0.15.
    pub behavioral: Option<f64>,
    /// Default: 0.15.
    pub payment: Option<f64>,
    /// Default: 0.15.
    pub legal: Option<f64>,
    /// Default: 0.05.
    pub fraud: Option<f64>,
    /// Default: 0.05.
    pub content: Option<f64>,
}

impl SignalWeights {
    /// Effective weight for one signal kind.
    pub fn effective(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Network => self.network.unwrap_or(0.15),
            SignalKind::Entity => self.entity.unwrap_or(0.30),
            SignalKind::Behavioral => self.behavioral.unwrap_or(0.15),
            SignalKind::Payment => self.payment.unwrap_or(0.15),
            SignalKind::Legal => self.legal.unwrap_or(0.15),
            SignalKind::Fraud => self.fraud.unwrap_or(0.05),
            SignalKind::Content => self.content.unwrap_or(0.05),
        }
    }

    /// Sum of all effective weights.
    pub fn sum(&self) -> f64 {
        SignalKind::ALL.iter().map(|k| self.effective(*k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let w = SignalWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn entity_carries_the_largest_default_weight() {
        let w = SignalWeights::default();
        for kind in SignalKind::ALL {
            if kind != SignalKind::Entity {
                assert!(w.effective(kind) < w.effective(SignalKind::Entity));
            }
        }
    }
}
