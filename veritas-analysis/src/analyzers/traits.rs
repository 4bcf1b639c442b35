//! Analyzer trait.

use veritas_core::errors::AnalyzerError;
use veritas_core::types::{OnboardingRequest, RiskSignal, SignalKind};

/// One risk axis over an onboarding request.
///
/// Implementations are pure with respect to their inputs: the same request,
/// clock, and collaborator state always produce the same signal. `analyze`
/// runs on a fan-out worker thread, so implementations must be `Send + Sync`
/// and must not block beyond their lookup calls.
pub trait SignalAnalyzer: Send + Sync {
    /// Which signal this analyzer produces.
    fn kind(&self) -> SignalKind;

    /// Score the request. `now` is Unix seconds at pipeline start.
    fn analyze(&self, request: &OnboardingRequest, now: i64) -> Result<RiskSignal, AnalyzerError>;
}
