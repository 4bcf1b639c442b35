//! Entity analyzer.
//!
//! Screens the vendor and the entities it names against sanctions,
//! PEP, jurisdiction, and adverse-media tables. A sanctions hit is
//! terminal: no later averaging may dilute it.

use std::sync::Arc;

use veritas_core::errors::AnalyzerError;
use veritas_core::traits::NlpIntel;
use veritas_core::types::{Evidence, OnboardingRequest, RiskFactor, RiskSignal, SignalKind};

use crate::extract::KeywordScanner;
use crate::scoring::blend::blend_max_mean;
use crate::tables;

use super::traits::SignalAnalyzer;

const MAX_WEIGHT: f64 = 0.7;
const SANCTIONS_SEVERITY: f64 = 1.0;
const JURISDICTION_SEVERITY: f64 = 0.8;
const PEP_SEVERITY: f64 = 0.6;
const NEGATIVE_NEWS_BASE: f64 = 0.3;
const NEGATIVE_NEWS_STEP: f64 = 0.1;
const NEGATIVE_NEWS_CAP: f64 = 0.7;
const MISSING_SUFFIX_SEVERITY: f64 = 0.2;
const DOMAIN_MISMATCH_SEVERITY: f64 = 0.15;

/// A registered business usually carries one of these in its name.
const CORPORATE_SUFFIXES: &[&str] = &["inc", "llc", "ltd", "corp", "corporation", "limited"];

pub struct EntityAnalyzer {
    nlp: Arc<dyn NlpIntel>,
    sanctions: KeywordScanner,
    peps: KeywordScanner,
    jurisdictions: KeywordScanner,
    negative_news: KeywordScanner,
}

impl EntityAnalyzer {
    pub fn new(nlp: Arc<dyn NlpIntel>) -> Self {
        Self {
            nlp,
            sanctions: KeywordScanner::new(tables::SANCTIONED_ENTITIES),
            peps: KeywordScanner::new(tables::PEP_NAMES),
            jurisdictions: KeywordScanner::new(tables::HIGH_RISK_JURISDICTIONS),
            negative_news: KeywordScanner::new(tables::NEGATIVE_NEWS_TERMS),
        }
    }
}

impl SignalAnalyzer for EntityAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Entity
    }

    fn analyze(&self, request: &OnboardingRequest, _now: i64) -> Result<RiskSignal, AnalyzerError> {
        let analysis = self.nlp.analyze(&request.business_description)?;

        // Screen the vendor name plus every entity the description names.
        let mut screened = vec![request.vendor_name.clone()];
        screened.extend(analysis.entities);

        let mut factors = Vec::new();

        for name in &screened {
            for hit in self.sanctions.scan(name) {
                factors.push(RiskFactor::with_evidence(
                    "sanctions_match",
                    SANCTIONS_SEVERITY,
                    Evidence::KeywordMatch {
                        keyword: hit.keyword,
                        context: name.clone(),
                    },
                ));
            }
        }
        // Terminal: return before softer checks can add diluting factors.
        if !factors.is_empty() {
            return Ok(RiskSignal::new(SignalKind::Entity, SANCTIONS_SEVERITY, factors));
        }

        for hit in self.jurisdictions.scan(&request.business_description) {
            factors.push(RiskFactor::with_evidence(
                "high_risk_jurisdiction",
                JURISDICTION_SEVERITY,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }

        for name in &screened {
            for hit in self.peps.scan(name) {
                factors.push(RiskFactor::with_evidence(
                    "pep_match",
                    PEP_SEVERITY,
                    Evidence::KeywordMatch {
                        keyword: hit.keyword,
                        context: name.clone(),
                    },
                ));
            }
        }

        let news_hits = self.negative_news.matched_keywords(
            &request.business_description.to_lowercase(),
        );
        if !news_hits.is_empty() {
            let severity = (NEGATIVE_NEWS_BASE + NEGATIVE_NEWS_STEP * news_hits.len() as f64)
                .min(NEGATIVE_NEWS_CAP);
            factors.push(RiskFactor::with_evidence(
                "adverse_media",
                severity,
                Evidence::Metric {
                    name: "negative_news_terms".to_string(),
                    value: news_hits.len() as f64,
                },
            ));
        }

        // Registry plausibility: does the application read like a
        // registered business at all?
        let name_lower = request.vendor_name.to_lowercase();
        if !CORPORATE_SUFFIXES.iter().any(|s| name_lower.contains(s)) {
            factors.push(RiskFactor::new("no_corporate_suffix", MISSING_SUFFIX_SEVERITY));
        }
        if let Some(domain) = request.email_domain() {
            let label = domain.split('.').next().unwrap_or(domain).to_lowercase();
            let vendor_clean: String =
                name_lower.chars().filter(|c| c.is_alphanumeric()).collect();
            if !vendor_clean.contains(&label) && !label.contains(&vendor_clean) {
                factors.push(RiskFactor::new(
                    "email_domain_mismatch",
                    DOMAIN_MISMATCH_SEVERITY,
                ));
            }
        }

        let severities: Vec<f64> = factors.iter().map(|f| f.severity).collect();
        let score = blend_max_mean(&severities, MAX_WEIGHT);
        Ok(RiskSignal::new(SignalKind::Entity, score, factors))
    }
}
