//! Analyzer registry.

use std::sync::Arc;

use veritas_core::config::VeritasConfig;
use veritas_core::traits::{DomainIntel, HistoryStore, NlpIntel};
use veritas_core::types::SignalKind;

use super::behavioral::BehavioralAnalyzer;
use super::content::ContentAnalyzer;
use super::entity::EntityAnalyzer;
use super::legal::LegalAnalyzer;
use super::network::NetworkAnalyzer;
use super::payment::PaymentAnalyzer;
use super::traits::SignalAnalyzer;
use super::trust::TrustAnalyzer;

/// The full analyzer set, one per signal kind.
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn SignalAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Build the standard seven analyzers over the given collaborators.
    pub fn standard(
        config: &VeritasConfig,
        domain_intel: Arc<dyn DomainIntel>,
        nlp: Arc<dyn NlpIntel>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let analysis = config.analysis.clone();
        let analyzers: Vec<Arc<dyn SignalAnalyzer>> = vec![
            Arc::new(NetworkAnalyzer::new(history.clone(), analysis.clone())),
            Arc::new(EntityAnalyzer::new(nlp.clone())),
            Arc::new(BehavioralAnalyzer::new(history, analysis.clone())),
            Arc::new(PaymentAnalyzer::new()),
            Arc::new(LegalAnalyzer::new()),
            Arc::new(TrustAnalyzer::new(domain_intel, analysis)),
            Arc::new(ContentAnalyzer::new(nlp)),
        ];
        Self { analyzers }
    }

    pub fn analyzers(&self) -> &[Arc<dyn SignalAnalyzer>] {
        &self.analyzers
    }

    pub fn get(&self, kind: SignalKind) -> Option<&Arc<dyn SignalAnalyzer>> {
        self.analyzers.iter().find(|a| a.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LexiconNlp, StaticDomainIntel};
    use veritas_core::errors::LookupError;
    use veritas_core::types::OnboardingRequest;

    struct EmptyHistory;

    impl HistoryStore for EmptyHistory {
        fn recent_requests(
            &self,
            _now: i64,
            _window_secs: i64,
            _limit: u32,
        ) -> Result<Vec<OnboardingRequest>, LookupError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = AnalyzerRegistry::standard(
            &VeritasConfig::default(),
            Arc::new(StaticDomainIntel::new()),
            Arc::new(LexiconNlp::new()),
            Arc::new(EmptyHistory),
        );
        assert_eq!(registry.len(), SignalKind::ALL.len());
        for kind in SignalKind::ALL {
            let analyzer = registry.get(kind).expect("missing analyzer");
            assert_eq!(analyzer.kind(), kind);
        }
    }
}
