//! Parallel analyzer fan-out.
//!
//! Each analyzer runs on its own thread against an immutable request
//! snapshot and reports back over a channel. A shared deadline bounds the
//! whole fan-out; any analyzer that errors, panics, or misses the deadline
//! is replaced by the neutral fallback signal so one bad signal can never
//! fail the request.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError};
use veritas_analysis::analyzers::SignalAnalyzer;
use veritas_core::errors::{AnalyzerError, VeritasErrorCode};
use veritas_core::events::{AnalyzerFallbackEvent, EventDispatcher};
use veritas_core::types::{OnboardingRequest, RiskSignal, SignalKind};

/// Run every analyzer against the request, returning one signal per
/// analyzer in canonical kind order.
///
/// The deadline is shared: slow analyzers that finish before it still
/// count, and whatever has not reported when it passes is timed out.
pub fn run_analyzers(
    analyzers: &[Arc<dyn SignalAnalyzer>],
    request: &OnboardingRequest,
    now: i64,
    timeout_ms: u64,
    dispatcher: &EventDispatcher,
) -> Vec<RiskSignal> {
    let (tx, rx) = bounded(analyzers.len());
    for analyzer in analyzers {
        let analyzer = Arc::clone(analyzer);
        let request = request.clone();
        let tx = tx.clone();
        std::thread::spawn(move || {
            let kind = analyzer.kind();
            let result = catch_unwind(AssertUnwindSafe(|| analyzer.analyze(&request, now)))
                .unwrap_or_else(|panic| {
                    Err(AnalyzerError::Panicked {
                        kind,
                        message: panic_message(panic),
                    })
                });
            // Receiver may already have given up on the deadline.
            let _ = tx.send((kind, result));
        });
    }
    drop(tx);

    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    let mut resolved: Vec<(SignalKind, Result<RiskSignal, AnalyzerError>)> =
        Vec::with_capacity(analyzers.len());
    while resolved.len() < analyzers.len() {
        match rx.recv_deadline(deadline) {
            Ok(entry) => resolved.push(entry),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let mut signals = Vec::with_capacity(analyzers.len());
    for kind in SignalKind::ALL {
        if !analyzers.iter().any(|a| a.kind() == kind) {
            continue;
        }
        let result = resolved
            .iter()
            .position(|(k, _)| *k == kind)
            .map(|i| resolved.swap_remove(i).1)
            .unwrap_or(Err(AnalyzerError::Timeout { kind, timeout_ms }));
        signals.push(resolve_signal(kind, result, request, dispatcher));
    }
    signals
}

/// Collapse one analyzer result into a signal, substituting the fallback
/// on any error.
fn resolve_signal(
    kind: SignalKind,
    result: Result<RiskSignal, AnalyzerError>,
    request: &OnboardingRequest,
    dispatcher: &EventDispatcher,
) -> RiskSignal {
    let error = match result {
        Ok(signal) if signal.kind == kind => return signal,
        Ok(signal) => AnalyzerError::ValidationDefect {
            kind,
            message: format!("produced a {} signal", signal.kind),
        },
        Err(error) => error,
    };

    if matches!(error, AnalyzerError::ValidationDefect { .. }) {
        tracing::error!(
            request_id = %request.request_id,
            %kind,
            %error,
            "analyzer contract violation; substituting fallback signal"
        );
    } else {
        tracing::warn!(
            request_id = %request.request_id,
            %kind,
            %error,
            "analyzer failed; substituting fallback signal"
        );
    }
    dispatcher.emit_analyzer_fallback(&AnalyzerFallbackEvent {
        request_id: request.request_id.to_string(),
        kind,
        error_code: error.error_code().to_string(),
        message: error.to_string(),
    });
    RiskSignal::fallback(kind)
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use veritas_core::errors::LookupError;
    use veritas_core::events::VeritasEventHandler;
    use veritas_core::types::{RequestId, RiskFactor};

    struct Fixed(SignalKind, f64);

    impl SignalAnalyzer for Fixed {
        fn kind(&self) -> SignalKind {
            self.0
        }
        fn analyze(
            &self,
            _request: &OnboardingRequest,
            _now: i64,
        ) -> Result<RiskSignal, AnalyzerError> {
            Ok(RiskSignal::new(
                self.0,
                self.1,
                vec![RiskFactor::new("fixed", self.1)],
            ))
        }
    }

    struct Failing(SignalKind);

    impl SignalAnalyzer for Failing {
        fn kind(&self) -> SignalKind {
            self.0
        }
        fn analyze(
            &self,
            _request: &OnboardingRequest,
            _now: i64,
        ) -> Result<RiskSignal, AnalyzerError> {
            Err(AnalyzerError::Lookup(LookupError::NlpUnavailable(
                "offline".to_string(),
            )))
        }
    }

    struct Panicking(SignalKind);

    impl SignalAnalyzer for Panicking {
        fn kind(&self) -> SignalKind {
            self.0
        }
        fn analyze(
            &self,
            _request: &OnboardingRequest,
            _now: i64,
        ) -> Result<RiskSignal, AnalyzerError> {
            panic!("analyzer bug")
        }
    }

    struct Sleepy(SignalKind);

    impl SignalAnalyzer for Sleepy {
        fn kind(&self) -> SignalKind {
            self.0
        }
        fn analyze(
            &self,
            _request: &OnboardingRequest,
            _now: i64,
        ) -> Result<RiskSignal, AnalyzerError> {
            std::thread::sleep(Duration::from_secs(5));
            Ok(RiskSignal::new(self.0, 0.0, vec![]))
        }
    }

    #[derive(Default)]
    struct FallbackRecorder {
        count: AtomicUsize,
        codes: Mutex<Vec<String>>,
    }

    impl VeritasEventHandler for FallbackRecorder {
        fn on_analyzer_fallback(&self, event: &AnalyzerFallbackEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.codes.lock().unwrap().push(event.error_code.clone());
        }
    }

    fn request() -> OnboardingRequest {
        OnboardingRequest {
            request_id: RequestId::from_string("fanout-test"),
            vendor_name: "Acme Corp".to_string(),
            contact_email: "ops@acme.com".to_string(),
            business_description: "Industrial supplies".to_string(),
            tax_id: "84-2957163".to_string(),
            source_ip: "203.0.113.7".to_string(),
            submitted_at: 1_767_614_400,
            form_completion_secs: Some(300),
        }
    }

    #[test]
    fn healthy_analyzers_report_in_canonical_order() {
        let analyzers: Vec<Arc<dyn SignalAnalyzer>> = vec![
            Arc::new(Fixed(SignalKind::Content, 0.1)),
            Arc::new(Fixed(SignalKind::Network, 0.2)),
            Arc::new(Fixed(SignalKind::Entity, 0.3)),
        ];
        let signals = run_analyzers(&analyzers, &request(), 0, 1000, &EventDispatcher::new());
        let kinds: Vec<SignalKind> = signals.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SignalKind::Network, SignalKind::Entity, SignalKind::Content]
        );
        assert!(signals.iter().all(|s| !s.is_fallback()));
    }

    #[test]
    fn erroring_analyzer_degrades_to_exactly_one_fallback() {
        let recorder = Arc::new(FallbackRecorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(recorder.clone());

        let analyzers: Vec<Arc<dyn SignalAnalyzer>> = vec![
            Arc::new(Fixed(SignalKind::Network, 0.2)),
            Arc::new(Failing(SignalKind::Content)),
        ];
        let signals = run_analyzers(&analyzers, &request(), 0, 1000, &dispatcher);

        assert_eq!(signals.len(), 2);
        let content = signals.iter().find(|s| s.kind == SignalKind::Content).unwrap();
        assert!(content.is_fallback());
        assert_eq!(content.score, 0.5);
        assert_eq!(content.factor_names(), vec!["error_default_score"]);
        assert_eq!(recorder.count.load(Ordering::SeqCst), 1);
        assert_eq!(
            *recorder.codes.lock().unwrap(),
            vec!["LOOKUP_UNAVAILABLE".to_string()]
        );
    }

    #[test]
    fn panicking_analyzer_does_not_poison_the_rest() {
        let analyzers: Vec<Arc<dyn SignalAnalyzer>> = vec![
            Arc::new(Panicking(SignalKind::Legal)),
            Arc::new(Fixed(SignalKind::Payment, 0.3)),
        ];
        let signals = run_analyzers(&analyzers, &request(), 0, 1000, &EventDispatcher::new());

        let legal = signals.iter().find(|s| s.kind == SignalKind::Legal).unwrap();
        assert!(legal.is_fallback());
        let payment = signals.iter().find(|s| s.kind == SignalKind::Payment).unwrap();
        assert_eq!(payment.score, 0.3);
    }

    #[test]
    fn deadline_times_out_only_the_slow_analyzer() {
        let recorder = Arc::new(FallbackRecorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(recorder.clone());

        let analyzers: Vec<Arc<dyn SignalAnalyzer>> = vec![
            Arc::new(Sleepy(SignalKind::Behavioral)),
            Arc::new(Fixed(SignalKind::Fraud, 0.1)),
        ];
        let signals = run_analyzers(&analyzers, &request(), 0, 200, &dispatcher);

        let behavioral = signals
            .iter()
            .find(|s| s.kind == SignalKind::Behavioral)
            .unwrap();
        assert!(behavioral.is_fallback());
        let fraud = signals.iter().find(|s| s.kind == SignalKind::Fraud).unwrap();
        assert!(!fraud.is_fallback());
        assert_eq!(
            *recorder.codes.lock().unwrap(),
            vec!["ANALYZER_ERROR".to_string()]
        );
    }
}
