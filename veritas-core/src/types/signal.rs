//! Per-analyzer results: signals, risk factors, and structured evidence.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clamp_score;

/// The seven signal analyzers, in aggregation-weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Fraud-ring detection over the recent-history window.
    Network,
    /// Sanctions, watchlist, PEP, and jurisdiction screening.
    Entity,
    /// Submission-behavior anomaly detection.
    Behavioral,
    /// Payment-history and financial-stability heuristics.
    Payment,
    /// Legal-records keyword and evidence extraction.
    Legal,
    /// Domain trust validation (website, TLS, MX, TLD).
    Fraud,
    /// Description sentiment and risky key phrases.
    Content,
}

impl SignalKind {
    /// All seven kinds, in a fixed order.
    pub const ALL: [SignalKind; 7] = [
        SignalKind::Network,
        SignalKind::Entity,
        SignalKind::Behavioral,
        SignalKind::Payment,
        SignalKind::Legal,
        SignalKind::Fraud,
        SignalKind::Content,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Entity => "entity",
            Self::Behavioral => "behavioral",
            Self::Payment => "payment",
            Self::Legal => "legal",
            Self::Fraud => "fraud",
            Self::Content => "content",
        }
    }

    /// Parse a storage-form name back into a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured evidence attached to a risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// A keyword hit with a bounded context window around the match.
    KeywordMatch { keyword: String, context: String },
    /// A case-number pattern extracted from free text.
    CaseNumber { value: String },
    /// A monetary penalty, judgment, or settlement amount.
    MonetaryAmount { value: String },
    /// A court-reference mention.
    CourtReference { value: String },
    /// A text-similarity measurement against a prior request.
    Similarity { value: f64, other_request: String },
    /// A named metric (z-score, counts, business age, ...).
    Metric { name: String, value: f64 },
    /// Vendors related to this request through shared infrastructure.
    RelatedVendors { vendors: Vec<String> },
}

/// One named contributor to a signal's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Stable snake_case factor name (e.g. `ip_clustering_4_vendors`).
    pub name: String,
    /// Severity in [0, 1]; clamped at construction.
    pub severity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, severity: f64) -> Self {
        Self {
            name: name.into(),
            severity: clamp_score(severity),
            evidence: None,
        }
    }

    pub fn with_evidence(name: impl Into<String>, severity: f64, evidence: Evidence) -> Self {
        Self {
            name: name.into(),
            severity: clamp_score(severity),
            evidence: Some(evidence),
        }
    }
}

/// Payment reliability bands, derived from the payment signal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReliabilityRating {
    Reliable,
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl ReliabilityRating {
    /// Band boundaries are lower-inclusive: [0,0.2) / [0.2,0.4) / [0.4,0.7) / [0.7,1].
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::HighRisk
        } else if score >= 0.4 {
            Self::MediumRisk
        } else if score >= 0.2 {
            Self::LowRisk
        } else {
            Self::Reliable
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reliable => "RELIABLE",
            Self::LowRisk => "LOW_RISK",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::HighRisk => "HIGH_RISK",
        }
    }
}

/// Legal standing derived from the legal signal score and its issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalStatus {
    Clear,
    LowRisk,
    MediumRisk,
    HighRisk,
    CriticalIssues,
}

impl LegalStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::LowRisk => "LOW_RISK",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::HighRisk => "HIGH_RISK",
            Self::CriticalIssues => "CRITICAL_ISSUES",
        }
    }
}

/// Categorical rating attached to some signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalRating {
    Reliability(ReliabilityRating),
    Legal(LegalStatus),
}

/// One analyzer's result for one request. Produced exactly once, immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSignal {
    pub kind: SignalKind,
    /// Score in [0, 1]; clamped at construction so an out-of-range value
    /// can never leave the constructor.
    pub score: f64,
    /// Ordered list of contributing factors.
    pub factors: Vec<RiskFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<SignalRating>,
}

impl RiskSignal {
    pub fn new(kind: SignalKind, score: f64, factors: Vec<RiskFactor>) -> Self {
        Self {
            kind,
            score: clamp_score(score),
            factors,
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: SignalRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// The neutral substitute for an analyzer that failed or timed out.
    pub fn fallback(kind: SignalKind) -> Self {
        Self::new(kind, 0.5, vec![RiskFactor::new("error_default_score", 0.5)])
    }

    /// True if this signal was substituted by the fallback policy.
    pub fn is_fallback(&self) -> bool {
        self.factors.iter().any(|f| f.name == "error_default_score")
    }

    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_score_is_clamped_at_construction() {
        let s = RiskSignal::new(SignalKind::Legal, 1.4, vec![]);
        assert_eq!(s.score, 1.0);
        let s = RiskSignal::new(SignalKind::Legal, -0.2, vec![]);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn fallback_signal_shape() {
        let s = RiskSignal::fallback(SignalKind::Fraud);
        assert_eq!(s.score, 0.5);
        assert!(s.is_fallback());
        assert_eq!(s.factor_names(), vec!["error_default_score"]);
    }

    #[test]
    fn reliability_bands_are_lower_inclusive() {
        assert_eq!(ReliabilityRating::from_score(0.0), ReliabilityRating::Reliable);
        assert_eq!(ReliabilityRating::from_score(0.2), ReliabilityRating::LowRisk);
        assert_eq!(ReliabilityRating::from_score(0.4), ReliabilityRating::MediumRisk);
        assert_eq!(ReliabilityRating::from_score(0.7), ReliabilityRating::HighRisk);
        assert_eq!(ReliabilityRating::from_score(0.95), ReliabilityRating::HighRisk);
    }

    #[test]
    fn evidence_serializes_with_kind_tag() {
        let factor = RiskFactor::with_evidence(
            "case_number_found",
            0.6,
            Evidence::CaseNumber {
                value: "2023-cv-1234".to_string(),
            },
        );
        let json = serde_json::to_value(&factor).unwrap();
        assert_eq!(json["evidence"]["kind"], "case_number");
        assert_eq!(json["evidence"]["value"], "2023-cv-1234");
    }

    #[test]
    fn kind_name_roundtrip() {
        for kind in SignalKind::ALL {
            assert_eq!(SignalKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(SignalKind::from_name("bogus"), None);
    }
}
