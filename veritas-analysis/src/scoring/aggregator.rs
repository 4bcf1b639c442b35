//! Weighted signal aggregation with critical overrides.

use veritas_core::config::SignalWeights;
use veritas_core::errors::PipelineError;
use veritas_core::types::{clamp_score, AggregateRiskProfile, RiskSignal, SignalKind};

/// An entity signal at or above this forces the combined score up to it.
const ENTITY_OVERRIDE: f64 = 0.95;
/// A legal signal at or above this forces the combined score to 0.9+.
const LEGAL_OVERRIDE_TRIGGER: f64 = 0.9;
const LEGAL_OVERRIDE_FLOOR: f64 = 0.9;

/// Combine the seven signals into one profile.
///
/// Requires exactly one signal per kind and a weight table summing to 1.0;
/// anything else is an invariant violation, not a scoring question. The
/// critical overrides keep a sanctions or criminal finding from being
/// averaged below its floor by five healthy signals.
pub fn aggregate(
    signals: Vec<RiskSignal>,
    weights: &SignalWeights,
) -> Result<AggregateRiskProfile, PipelineError> {
    let weight_sum = weights.sum();
    if (weight_sum - 1.0).abs() > 1e-9 {
        return Err(PipelineError::AggregationInvariant(format!(
            "weights sum to {weight_sum}, expected 1.0"
        )));
    }

    let mut ordered: Vec<RiskSignal> = Vec::with_capacity(SignalKind::ALL.len());
    for kind in SignalKind::ALL {
        let mut matching = signals.iter().filter(|s| s.kind == kind);
        let signal = matching
            .next()
            .ok_or(PipelineError::MissingSignal { kind })?;
        if matching.next().is_some() {
            return Err(PipelineError::AggregationInvariant(format!(
                "duplicate {kind} signal"
            )));
        }
        if !(0.0..=1.0).contains(&signal.score) {
            return Err(PipelineError::AggregationInvariant(format!(
                "{kind} score {} out of range",
                signal.score
            )));
        }
        ordered.push(signal.clone());
    }

    let mut combined: f64 = ordered
        .iter()
        .map(|s| weights.effective(s.kind) * s.score)
        .sum();

    let entity = ordered
        .iter()
        .find(|s| s.kind == SignalKind::Entity)
        .map_or(0.0, |s| s.score);
    let legal = ordered
        .iter()
        .find(|s| s.kind == SignalKind::Legal)
        .map_or(0.0, |s| s.score);
    if entity >= ENTITY_OVERRIDE {
        combined = combined.max(entity);
    }
    if legal >= LEGAL_OVERRIDE_TRIGGER {
        combined = combined.max(LEGAL_OVERRIDE_FLOOR);
    }

    Ok(AggregateRiskProfile {
        signals: ordered,
        combined_score: clamp_score(combined),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals_with(kind: SignalKind, score: f64) -> Vec<RiskSignal> {
        SignalKind::ALL
            .iter()
            .map(|&k| RiskSignal::new(k, if k == kind { score } else { 0.1 }, vec![]))
            .collect()
    }

    fn flat(score: f64) -> Vec<RiskSignal> {
        SignalKind::ALL
            .iter()
            .map(|&k| RiskSignal::new(k, score, vec![]))
            .collect()
    }

    #[test]
    fn combined_is_the_weighted_sum() {
        let profile = aggregate(flat(0.4), &SignalWeights::default()).unwrap();
        assert!((profile.combined_score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn signals_come_back_in_canonical_order() {
        let mut shuffled = flat(0.2);
        shuffled.reverse();
        let profile = aggregate(shuffled, &SignalWeights::default()).unwrap();
        let kinds: Vec<_> = profile.signals.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SignalKind::ALL.to_vec());
    }

    #[test]
    fn missing_signal_is_an_invariant_violation() {
        let mut signals = flat(0.2);
        signals.retain(|s| s.kind != SignalKind::Legal);
        let result = aggregate(signals, &SignalWeights::default());
        assert!(matches!(
            result,
            Err(PipelineError::MissingSignal {
                kind: SignalKind::Legal
            })
        ));
    }

    #[test]
    fn duplicate_signal_is_an_invariant_violation() {
        let mut signals = flat(0.2);
        signals.push(RiskSignal::new(SignalKind::Fraud, 0.3, vec![]));
        let result = aggregate(signals, &SignalWeights::default());
        assert!(matches!(result, Err(PipelineError::AggregationInvariant(_))));
    }

    #[test]
    fn sanctions_entity_overrides_healthy_signals() {
        let profile =
            aggregate(signals_with(SignalKind::Entity, 1.0), &SignalWeights::default()).unwrap();
        assert!(profile.combined_score >= 0.95);
    }

    #[test]
    fn critical_legal_overrides_healthy_signals() {
        let profile =
            aggregate(signals_with(SignalKind::Legal, 0.95), &SignalWeights::default()).unwrap();
        assert!(profile.combined_score >= 0.9);
    }

    #[test]
    fn sub_threshold_legal_does_not_trigger_the_override() {
        let profile =
            aggregate(signals_with(SignalKind::Legal, 0.85), &SignalWeights::default()).unwrap();
        assert!(profile.combined_score < 0.9);
    }
}
