//! The lifecycle controller.
//!
//! Owns the SUBMITTED → ANALYZING → SCORED → DECIDED progression for each
//! request: persists every transition with an audit row, fans the analyzers
//! out, aggregates, decides, and emits events along the way.

use std::sync::Arc;

use veritas_analysis::analyzers::AnalyzerRegistry;
use veritas_analysis::nlp::{LexiconNlp, StaticDomainIntel};
use veritas_analysis::scoring::{aggregate, decide};
use veritas_core::config::VeritasConfig;
use veritas_core::errors::PipelineError;
use veritas_core::events::{
    DecisionReachedEvent, EventDispatcher, SignalScoredEvent, StateChangedEvent,
    VeritasEventHandler,
};
use veritas_core::traits::{DomainIntel, HistoryStore, NlpIntel};
use veritas_core::types::{
    AuditEvent, Decision, OnboardingRequest, RequestId, RequestState,
};
use veritas_storage::connection::writer::with_immediate_transaction;
use veritas_storage::queries::decisions::StoredDecision;
use veritas_storage::queries::{audit, decisions, requests, signals};
use veritas_storage::{DatabaseManager, SqliteHistoryStore};

use crate::fanout::run_analyzers;

/// Point-in-time view of a request, served by [`OnboardingController::status`].
#[derive(Debug, Clone)]
pub struct RequestStatus {
    pub state: RequestState,
    /// Present once the request reaches DECIDED.
    pub decision: Option<StoredDecision>,
}

/// Drives requests through the full lifecycle against one database.
pub struct OnboardingController {
    config: VeritasConfig,
    db: Arc<DatabaseManager>,
    registry: AnalyzerRegistry,
    dispatcher: EventDispatcher,
}

impl OnboardingController {
    /// Build a controller with the standard collaborators: lexicon NLP,
    /// static domain intelligence, and history served from the database.
    pub fn new(config: VeritasConfig, db: Arc<DatabaseManager>) -> Result<Self, PipelineError> {
        let history = Arc::new(SqliteHistoryStore::new(Arc::clone(&db)));
        Self::with_collaborators(
            config,
            db,
            Arc::new(StaticDomainIntel::new()),
            Arc::new(LexiconNlp::new()),
            history,
        )
    }

    /// Build a controller with explicit collaborators.
    pub fn with_collaborators(
        config: VeritasConfig,
        db: Arc<DatabaseManager>,
        domain_intel: Arc<dyn DomainIntel>,
        nlp: Arc<dyn NlpIntel>,
        history: Arc<dyn HistoryStore>,
    ) -> Result<Self, PipelineError> {
        VeritasConfig::validate(&config)?;
        let registry = AnalyzerRegistry::standard(&config, domain_intel, nlp, history);
        Ok(Self {
            config,
            db,
            registry,
            dispatcher: EventDispatcher::new(),
        })
    }

    /// Register a lifecycle event handler.
    pub fn register_handler(&mut self, handler: Arc<dyn VeritasEventHandler>) {
        self.dispatcher.register(handler);
    }

    /// Persist a new request in the SUBMITTED state, with its first
    /// audit row attributed to the requester.
    pub fn submit(&self, request: &OnboardingRequest) -> Result<(), PipelineError> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                requests::insert_request(tx, request)?;
                audit::append_audit(
                    tx,
                    &request.request_id,
                    &AuditEvent::requester(&request.contact_email, "SUBMITTED", request.submitted_at),
                )
            })
        })?;
        tracing::info!(request_id = %request.request_id, "request submitted");
        Ok(())
    }

    /// Run a submitted request to its decision.
    ///
    /// Only legal from SUBMITTED. Analyzer failures degrade to fallback
    /// signals inside the fan-out; this method fails only on storage or
    /// aggregation-invariant errors.
    pub fn process(&self, request_id: &RequestId, now: i64) -> Result<Decision, PipelineError> {
        let request = self
            .db
            .with_reader(|conn| requests::get_request(conn, request_id))?;
        let state = self
            .db
            .with_reader(|conn| requests::get_state(conn, request_id))?;
        if state != RequestState::Submitted {
            return Err(PipelineError::IllegalTransition {
                from: state,
                to: RequestState::Analyzing,
            });
        }

        self.transition(request_id, state, RequestState::Analyzing, "ANALYSIS_STARTED", now)?;

        let timeout_ms = self.config.analysis.effective_analyzer_timeout_ms();
        let resolved =
            run_analyzers(self.registry.analyzers(), &request, now, timeout_ms, &self.dispatcher);
        for signal in &resolved {
            self.dispatcher.emit_signal_scored(&SignalScoredEvent {
                request_id: request_id.to_string(),
                kind: signal.kind,
                score: signal.score,
                factor_count: signal.factors.len(),
            });
        }

        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                for signal in &resolved {
                    signals::insert_signal(tx, request_id, signal, now)?;
                    if signal.is_fallback() {
                        let action =
                            format!("ANALYZER_FALLBACK_{}", signal.kind.name().to_ascii_uppercase());
                        audit::append_audit(tx, request_id, &AuditEvent::system(action, now))?;
                    }
                }
                requests::update_state(tx, request_id, RequestState::Scored)?;
                audit::append_audit(tx, request_id, &AuditEvent::system("RISK_SCORED", now))
            })
        })?;
        self.emit_state_changed(request_id, RequestState::Analyzing, RequestState::Scored);

        let profile = aggregate(resolved, &self.config.weights)?;
        let decision = decide(profile, &self.config.thresholds, now);

        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                decisions::insert_decision(tx, request_id, &decision)?;
                requests::update_state(tx, request_id, RequestState::Decided)?;
                audit::append_audit(
                    tx,
                    request_id,
                    &AuditEvent::system(format!("DECIDED_{}", decision.outcome.name()), now),
                )
            })
        })?;
        self.emit_state_changed(request_id, RequestState::Scored, RequestState::Decided);
        self.dispatcher.emit_decision_reached(&DecisionReachedEvent {
            request_id: request_id.to_string(),
            outcome: decision.outcome,
            combined_score: decision.profile.combined_score,
            reason_codes: decision.reason_codes.clone(),
        });
        tracing::info!(
            request_id = %request_id,
            outcome = %decision.outcome,
            combined_score = decision.profile.combined_score,
            "decision reached"
        );
        Ok(decision)
    }

    /// Poll a request. Read-only and safe to call at any point in the
    /// lifecycle, any number of times.
    pub fn status(&self, request_id: &RequestId) -> Result<RequestStatus, PipelineError> {
        let state = self
            .db
            .with_reader(|conn| requests::get_state(conn, request_id))?;
        let decision = if state == RequestState::Decided {
            self.db
                .with_reader(|conn| decisions::get_decision(conn, request_id))?
        } else {
            None
        };
        Ok(RequestStatus { state, decision })
    }

    /// Full audit trail for a request, oldest first.
    pub fn audit_trail(&self, request_id: &RequestId) -> Result<Vec<AuditEvent>, PipelineError> {
        Ok(self
            .db
            .with_reader(|conn| audit::query_audit(conn, request_id))?)
    }

    fn transition(
        &self,
        request_id: &RequestId,
        from: RequestState,
        to: RequestState,
        action: &str,
        now: i64,
    ) -> Result<(), PipelineError> {
        if from.next() != Some(to) {
            return Err(PipelineError::IllegalTransition { from, to });
        }
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                requests::update_state(tx, request_id, to)?;
                audit::append_audit(tx, request_id, &AuditEvent::system(action, now))
            })
        })?;
        self.emit_state_changed(request_id, from, to);
        Ok(())
    }

    fn emit_state_changed(&self, request_id: &RequestId, from: RequestState, to: RequestState) {
        self.dispatcher.emit_state_changed(&StateChangedEvent {
            request_id: request_id.to_string(),
            from,
            to,
        });
    }
}
