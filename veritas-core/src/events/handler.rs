//! Handler trait for pipeline events.

use super::types::*;

/// Observer interface over the pipeline lifecycle.
///
/// Every method has a no-op default so handlers implement only what they
/// care about. Handlers must be cheap: dispatch is synchronous and runs
/// on the pipeline thread.
pub trait VeritasEventHandler: Send + Sync {
    fn on_state_changed(&self, _event: &StateChangedEvent) {}
    fn on_signal_scored(&self, _event: &SignalScoredEvent) {}
    fn on_analyzer_fallback(&self, _event: &AnalyzerFallbackEvent) {}
    fn on_decision_reached(&self, _event: &DecisionReachedEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
