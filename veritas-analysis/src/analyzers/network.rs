//! Network analyzer.
//!
//! Detects coordinated-submission rings over the recent-history window:
//! shared source IPs, shared business email domains, near-duplicate
//! descriptions, submission bursts, and connected clusters of all three.

use std::sync::Arc;

use petgraph::graph::UnGraph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use veritas_core::config::AnalysisConfig;
use veritas_core::errors::AnalyzerError;
use veritas_core::traits::HistoryStore;
use veritas_core::types::{Evidence, OnboardingRequest, RiskFactor, RiskSignal, SignalKind};

use crate::extract::similarity::{jaccard, normalized_fingerprint, token_set};
use crate::scoring::blend::blend_max_mean;
use crate::tables;

use super::traits::SignalAnalyzer;

const MAX_WEIGHT: f64 = 0.7;
/// At most this many similarity factors are attached as evidence.
const SIMILARITY_FACTOR_CAP: usize = 3;

pub struct NetworkAnalyzer {
    history: Arc<dyn HistoryStore>,
    config: AnalysisConfig,
}

impl NetworkAnalyzer {
    pub fn new(history: Arc<dyn HistoryStore>, config: AnalysisConfig) -> Self {
        Self { history, config }
    }

    fn ip_cluster_severity(count: usize) -> f64 {
        (0.5 + 0.1 * count as f64).min(1.0)
    }

    fn shared_domain_severity(count: usize) -> f64 {
        (0.3 + 0.08 * count as f64).min(0.8)
    }

    fn burst_severity(count: usize) -> f64 {
        (0.2 + 0.03 * count as f64).min(0.7)
    }

    fn ring_severity(size: usize) -> f64 {
        (0.4 + 0.1 * size as f64).min(1.0)
    }
}

impl SignalAnalyzer for NetworkAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Network
    }

    fn analyze(&self, request: &OnboardingRequest, now: i64) -> Result<RiskSignal, AnalyzerError> {
        let window_secs = i64::from(self.config.effective_history_window_hours()) * 3600;
        let prior: Vec<OnboardingRequest> = self
            .history
            .recent_requests(now, window_secs, self.config.effective_history_limit())?
            .into_iter()
            .filter(|p| p.request_id != request.request_id)
            .collect();

        let mut factors = Vec::new();

        // Shared source IP.
        let same_ip: Vec<&OnboardingRequest> =
            prior.iter().filter(|p| p.source_ip == request.source_ip).collect();
        let ip_count = same_ip.len() + 1;
        if ip_count >= self.config.effective_ip_cluster_min() as usize {
            factors.push(RiskFactor::with_evidence(
                format!("ip_clustering_{ip_count}_vendors"),
                Self::ip_cluster_severity(ip_count),
                Evidence::RelatedVendors {
                    vendors: same_ip.iter().map(|p| p.vendor_name.clone()).collect(),
                },
            ));
        }

        // Shared business email domain. Consumer providers are exempt;
        // hundreds of unrelated vendors legitimately share gmail.com.
        if let Some(domain) = request.email_domain() {
            let domain = domain.to_lowercase();
            if !tables::free_mail_providers().contains(domain.as_str()) {
                let same_domain: Vec<&OnboardingRequest> = prior
                    .iter()
                    .filter(|p| {
                        p.email_domain()
                            .is_some_and(|d| d.eq_ignore_ascii_case(&domain))
                    })
                    .collect();
                let domain_count = same_domain.len() + 1;
                if domain_count >= self.config.effective_shared_domain_min() as usize {
                    factors.push(RiskFactor::with_evidence(
                        format!("shared_domain_{domain_count}_vendors"),
                        Self::shared_domain_severity(domain_count),
                        Evidence::RelatedVendors {
                            vendors: same_domain.iter().map(|p| p.vendor_name.clone()).collect(),
                        },
                    ));
                }
            }
        }

        // Near-duplicate descriptions. Fingerprint equality catches verbatim
        // copies without a set comparison; everything else pays for one
        // Jaccard per prior request, in parallel.
        let threshold = self.config.effective_similarity_threshold();
        let own_tokens = token_set(&request.business_description);
        let own_fingerprint = normalized_fingerprint(&request.business_description);
        let mut similar: Vec<(f64, &OnboardingRequest)> = prior
            .par_iter()
            .filter_map(|p| {
                if normalized_fingerprint(&p.business_description) == own_fingerprint {
                    return Some((1.0, p));
                }
                let sim = jaccard(&own_tokens, &token_set(&p.business_description));
                (sim > threshold).then_some((sim, p))
            })
            .collect();
        similar.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (sim, other) in similar.into_iter().take(SIMILARITY_FACTOR_CAP) {
            factors.push(RiskFactor::with_evidence(
                "description_similarity",
                sim,
                Evidence::Similarity {
                    value: sim,
                    other_request: other.request_id.to_string(),
                },
            ));
        }

        // Submission burst in the trailing window.
        let burst_window = i64::from(self.config.effective_burst_window_mins()) * 60;
        let burst_count = prior
            .iter()
            .filter(|p| request.submitted_at - p.submitted_at <= burst_window)
            .count()
            + 1;
        if burst_count >= self.config.effective_burst_threshold() as usize {
            factors.push(RiskFactor::with_evidence(
                "submission_burst",
                Self::burst_severity(burst_count),
                Evidence::Metric {
                    name: "submissions_in_window".to_string(),
                    value: burst_count as f64,
                },
            ));
        }

        // Ring detection: connect requests sharing infrastructure and
        // measure the component around this one.
        let ring_size = self.ring_component_size(request, &prior, threshold);
        if ring_size >= 3 {
            tracing::warn!(
                request_id = %request.request_id,
                ring_size,
                "request sits inside a shared-infrastructure ring"
            );
            factors.push(RiskFactor::new(
                format!("fraud_ring_{ring_size}_members"),
                Self::ring_severity(ring_size),
            ));
        }

        let severities: Vec<f64> = factors.iter().map(|f| f.severity).collect();
        let score = blend_max_mean(&severities, MAX_WEIGHT);
        Ok(RiskSignal::new(SignalKind::Network, score, factors))
    }
}

impl NetworkAnalyzer {
    /// Size of the connected component containing `request` in the
    /// shared-infrastructure graph.
    fn ring_component_size(
        &self,
        request: &OnboardingRequest,
        prior: &[OnboardingRequest],
        threshold: f64,
    ) -> usize {
        let mut graph: UnGraph<(), ()> = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..=prior.len()).map(|_| graph.add_node(())).collect();

        let all: Vec<&OnboardingRequest> =
            std::iter::once(request).chain(prior.iter()).collect();
        let tokens: Vec<_> = all
            .iter()
            .map(|r| token_set(&r.business_description))
            .collect();
        let domains: Vec<Option<String>> = all
            .iter()
            .map(|r| {
                r.email_domain()
                    .map(str::to_lowercase)
                    .filter(|d| !tables::free_mail_providers().contains(d.as_str()))
            })
            .collect();

        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                let linked = all[i].source_ip == all[j].source_ip
                    || matches!((&domains[i], &domains[j]), (Some(a), Some(b)) if a == b)
                    || jaccard(&tokens[i], &tokens[j]) > threshold;
                if linked {
                    graph.add_edge(nodes[i], nodes[j], ());
                }
            }
        }

        let mut components = UnionFind::new(graph.node_count());
        for edge in graph.edge_references() {
            components.union(edge.source().index(), edge.target().index());
        }
        let own = components.find(nodes[0].index());
        (0..graph.node_count())
            .filter(|&i| components.find(i) == own)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::errors::LookupError;
    use veritas_core::types::RequestId;

    struct FixedHistory(Vec<OnboardingRequest>);

    impl HistoryStore for FixedHistory {
        fn recent_requests(
            &self,
            _now: i64,
            _window_secs: i64,
            _limit: u32,
        ) -> Result<Vec<OnboardingRequest>, LookupError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenHistory;

    impl HistoryStore for BrokenHistory {
        fn recent_requests(
            &self,
            _now: i64,
            _window_secs: i64,
            _limit: u32,
        ) -> Result<Vec<OnboardingRequest>, LookupError> {
            Err(LookupError::HistoryUnavailable("store offline".to_string()))
        }
    }

    fn request(name: &str, ip: &str, email: &str, description: &str) -> OnboardingRequest {
        OnboardingRequest {
            request_id: RequestId::generate(),
            vendor_name: name.to_string(),
            contact_email: email.to_string(),
            business_description: description.to_string(),
            tax_id: "12-3456789".to_string(),
            source_ip: ip.to_string(),
            submitted_at: 1_760_000_000,
            form_completion_secs: None,
        }
    }

    fn analyzer(history: Vec<OnboardingRequest>) -> NetworkAnalyzer {
        NetworkAnalyzer::new(Arc::new(FixedHistory(history)), AnalysisConfig::default())
    }

    #[test]
    fn empty_history_scores_zero() {
        let current = request("Acme", "203.0.113.7", "ops@acme.com", "Industrial supplies");
        let signal = analyzer(vec![]).analyze(&current, 1_760_000_000).unwrap();
        assert_eq!(signal.score, 0.0);
        assert!(signal.factors.is_empty());
    }

    #[test]
    fn three_vendors_on_one_ip_cross_the_manual_review_line() {
        let history = vec![
            request("Vendor A", "198.51.100.9", "a@alpha-goods.com", "Office furniture resale"),
            request("Vendor B", "198.51.100.9", "b@beta-goods.com", "Cleaning services citywide"),
        ];
        let current = request("Vendor C", "198.51.100.9", "c@gamma-goods.com", "Catering and events");
        let signal = analyzer(history).analyze(&current, 1_760_000_000).unwrap();

        assert!(signal.score >= 0.7, "score {} below 0.7", signal.score);
        assert!(signal
            .factor_names()
            .iter()
            .any(|n| n.starts_with("ip_clustering_3")));
        assert!(signal
            .factor_names()
            .iter()
            .any(|n| n.starts_with("fraud_ring_3")));
    }

    #[test]
    fn near_duplicate_description_is_attached_as_evidence() {
        let copied = "Premium consumer electronics wholesale distribution serving independent \
                      retailers nationwide with fast shipping and dedicated support since 2010";
        let history = vec![request("Vendor A", "198.51.100.9", "a@alpha-goods.com", copied)];
        let current = request(
            "Vendor B",
            "203.0.113.7",
            "b@beta-goods.com",
            "Premium consumer electronics wholesale distribution serving independent \
             retailers nationwide with fast shipping and dedicated support since 2012",
        );
        let signal = analyzer(history).analyze(&current, 1_760_000_000).unwrap();

        let factor = signal
            .factors
            .iter()
            .find(|f| f.name == "description_similarity")
            .expect("similarity factor missing");
        match &factor.evidence {
            Some(Evidence::Similarity { value, .. }) => assert!(*value > 0.85),
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn gmail_addresses_do_not_form_a_domain_cluster() {
        let history: Vec<_> = (0..6)
            .map(|i| {
                request(
                    &format!("Vendor {i}"),
                    &format!("198.51.100.{i}"),
                    &format!("v{i}@gmail.com"),
                    &format!("Unrelated business number {i} selling assorted goods"),
                )
            })
            .collect();
        let current = request("Acme", "203.0.113.7", "ops@gmail.com", "Industrial supplies");
        let signal = analyzer(history).analyze(&current, 1_760_000_000).unwrap();
        assert!(!signal
            .factor_names()
            .iter()
            .any(|n| n.starts_with("shared_domain_")));
    }

    #[test]
    fn burst_of_submissions_raises_a_factor() {
        let history: Vec<_> = (0..10)
            .map(|i| {
                let mut r = request(
                    &format!("Vendor {i}"),
                    &format!("198.51.100.{i}"),
                    &format!("v{i}@vendor{i}.com"),
                    &format!("Distinct business number {i} with its own niche offering"),
                );
                r.submitted_at = 1_760_000_000 - 60 * i;
                r
            })
            .collect();
        let current = request("Acme", "203.0.113.7", "ops@acme.com", "Industrial supplies");
        let signal = analyzer(history).analyze(&current, 1_760_000_000).unwrap();
        let burst = signal
            .factors
            .iter()
            .find(|f| f.name == "submission_burst")
            .expect("burst factor missing");
        // 11 submissions in the window: 0.2 + 0.03 * 11.
        assert!((burst.severity - 0.53).abs() < 1e-9);
    }

    #[test]
    fn shared_corporate_domain_severity_scales_with_the_cluster() {
        let history: Vec<_> = (0..4)
            .map(|i| {
                request(
                    &format!("Desk {i} Staffing"),
                    &format!("198.51.100.{i}"),
                    &format!("branch{i}@consolidated-vendors.com"),
                    &format!("Regional staffing branch number {i} for light industry"),
                )
            })
            .collect();
        let current = request(
            "Acme Staffing",
            "203.0.113.7",
            "acme@consolidated-vendors.com",
            "Industrial supplies",
        );
        let signal = analyzer(history).analyze(&current, 1_760_000_000).unwrap();

        let domain = signal
            .factors
            .iter()
            .find(|f| f.name.starts_with("shared_domain_5"))
            .expect("shared domain factor missing");
        // Five vendors on one domain: 0.3 + 0.08 * 5.
        assert!((domain.severity - 0.7).abs() < 1e-9);
    }

    #[test]
    fn history_outage_propagates_as_lookup_error() {
        let analyzer = NetworkAnalyzer::new(Arc::new(BrokenHistory), AnalysisConfig::default());
        let current = request("Acme", "203.0.113.7", "ops@acme.com", "Industrial supplies");
        let result = analyzer.analyze(&current, 1_760_000_000);
        assert!(matches!(result, Err(AnalyzerError::Lookup(_))));
    }
}
