//! Outcome classification and reason codes.

use veritas_core::config::DecisionThresholds;
use veritas_core::types::{
    AggregateRiskProfile, Decision, DecisionOutcome, SignalKind,
};

/// A per-signal score at or above this earns a reason code.
const HIGH_SIGNAL: f64 = 0.7;

/// Map a profile onto its outcome band and explain it.
///
/// Reason codes are stable snake_case strings: they end up in stored
/// decisions and downstream review queues, so renaming one is a breaking
/// change.
pub fn decide(
    profile: AggregateRiskProfile,
    thresholds: &DecisionThresholds,
    decided_at: i64,
) -> Decision {
    let outcome = thresholds.classify(profile.combined_score);
    let mut reason_codes = Vec::new();

    if profile.score_of(SignalKind::Entity).unwrap_or(0.0) >= 0.95 {
        reason_codes.push("sanctions_match".to_string());
    }
    if profile.score_of(SignalKind::Legal).unwrap_or(0.0) >= 0.9 {
        reason_codes.push("critical_legal_issues".to_string());
    }
    for signal in &profile.signals {
        if signal.score >= HIGH_SIGNAL {
            let code = format!("{}_high_risk", signal.kind);
            if !reason_codes.contains(&code) {
                reason_codes.push(code);
            }
        }
    }
    for kind in profile.fallback_signals() {
        reason_codes.push(format!("degraded_{kind}_signal"));
    }
    if reason_codes.is_empty() && outcome == DecisionOutcome::AutoApprove {
        reason_codes.push("all_signals_low".to_string());
    }

    Decision {
        outcome,
        reason_codes,
        profile,
        decided_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::types::RiskSignal;

    fn profile(scores: &[(SignalKind, f64)], combined: f64) -> AggregateRiskProfile {
        let signals = SignalKind::ALL
            .iter()
            .map(|&k| {
                let score = scores
                    .iter()
                    .find(|(kind, _)| *kind == k)
                    .map_or(0.1, |(_, s)| *s);
                RiskSignal::new(k, score, vec![])
            })
            .collect();
        AggregateRiskProfile {
            signals,
            combined_score: combined,
        }
    }

    #[test]
    fn clean_profile_auto_approves_with_a_reason() {
        let decision = decide(profile(&[], 0.12), &DecisionThresholds::default(), 100);
        assert_eq!(decision.outcome, DecisionOutcome::AutoApprove);
        assert_eq!(decision.reason_codes, vec!["all_signals_low"]);
        assert_eq!(decision.decided_at, 100);
    }

    #[test]
    fn blocked_profile_names_the_driving_signals() {
        let decision = decide(
            profile(&[(SignalKind::Legal, 1.0), (SignalKind::Payment, 0.95)], 0.9),
            &DecisionThresholds::default(),
            100,
        );
        assert_eq!(decision.outcome, DecisionOutcome::Blocked);
        assert!(decision.reason_codes.contains(&"critical_legal_issues".to_string()));
        assert!(decision.reason_codes.contains(&"legal_high_risk".to_string()));
        assert!(decision.reason_codes.contains(&"payment_high_risk".to_string()));
    }

    #[test]
    fn fallback_signals_surface_as_degraded_codes() {
        let mut p = profile(&[], 0.2);
        p.signals[5] = RiskSignal::fallback(SignalKind::Fraud);
        let decision = decide(p, &DecisionThresholds::default(), 100);
        assert!(decision
            .reason_codes
            .contains(&"degraded_fraud_signal".to_string()));
    }

    #[test]
    fn mid_band_maps_to_enhanced_due_diligence() {
        let decision = decide(profile(&[], 0.55), &DecisionThresholds::default(), 100);
        assert_eq!(decision.outcome, DecisionOutcome::EnhancedDueDiligence);
    }
}
