//! Domain-trust analyzer (the fraud signal).
//!
//! Scores the contact domain's infrastructure: reachable website, TLS,
//! MX records, and TLD reputation. Weak infrastructure is the cheapest
//! fraud tell, so this runs entirely from the email domain.

use std::sync::Arc;

use moka::sync::Cache;

use veritas_core::config::AnalysisConfig;
use veritas_core::errors::AnalyzerError;
use veritas_core::traits::{DomainCheck, DomainIntel};
use veritas_core::types::{OnboardingRequest, RiskFactor, RiskSignal, SignalKind};

use super::traits::SignalAnalyzer;

/// Trust points per passing infrastructure check.
const WEBSITE_POINTS: f64 = 15.0;
const TLS_POINTS: f64 = 10.0;
const MX_POINTS: f64 = 10.0;
const TLD_POINTS: f64 = 5.0;
const TOTAL_POINTS: f64 = WEBSITE_POINTS + TLS_POINTS + MX_POINTS + TLD_POINTS;

pub struct TrustAnalyzer {
    domain_intel: Arc<dyn DomainIntel>,
    /// Domain probes are slow and domains repeat across a submission wave.
    cache: Cache<String, DomainCheck>,
    config: AnalysisConfig,
}

impl TrustAnalyzer {
    pub fn new(domain_intel: Arc<dyn DomainIntel>, config: AnalysisConfig) -> Self {
        Self {
            domain_intel,
            cache: Cache::builder().max_capacity(4096).build(),
            config,
        }
    }

    fn checked(&self, domain: &str) -> Result<DomainCheck, AnalyzerError> {
        if let Some(hit) = self.cache.get(domain) {
            return Ok(hit);
        }
        let check = self.domain_intel.check(domain)?;
        self.cache.insert(domain.to_string(), check);
        Ok(check)
    }
}

impl SignalAnalyzer for TrustAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Fraud
    }

    fn analyze(&self, request: &OnboardingRequest, _now: i64) -> Result<RiskSignal, AnalyzerError> {
        let floor = self.config.effective_trust_floor();
        let ceiling = self.config.effective_trust_ceiling();

        let Some(domain) = request.email_domain() else {
            return Ok(RiskSignal::new(
                SignalKind::Fraud,
                ceiling,
                vec![RiskFactor::new("missing_email_domain", ceiling)],
            ));
        };
        let domain = domain.to_lowercase();
        let check = self.checked(&domain)?;

        let mut points = 0.0;
        let mut factors = Vec::new();
        if check.website_resolves {
            points += WEBSITE_POINTS;
        } else {
            factors.push(RiskFactor::new(
                "website_unreachable",
                WEBSITE_POINTS / TOTAL_POINTS,
            ));
        }
        if check.has_tls {
            points += TLS_POINTS;
        } else {
            factors.push(RiskFactor::new("no_tls_certificate", TLS_POINTS / TOTAL_POINTS));
        }
        if check.has_mx {
            points += MX_POINTS;
        } else {
            factors.push(RiskFactor::new("no_mx_records", MX_POINTS / TOTAL_POINTS));
        }
        if check.tld_trusted {
            points += TLD_POINTS;
        } else {
            factors.push(RiskFactor::new("untrusted_tld", TLD_POINTS / TOTAL_POINTS));
        }

        let fraud = (1.0 - points / TOTAL_POINTS).clamp(floor, ceiling);
        Ok(RiskSignal::new(SignalKind::Fraud, fraud, factors))
    }
}
