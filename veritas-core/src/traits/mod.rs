//! Collaborator seams: domain intelligence, text analysis, history lookup.
//!
//! Analyzers depend on these traits, never on concrete backends. The
//! in-process defaults live in `veritas-analysis`; the SQLite-backed
//! history store lives in `veritas-storage`.

use crate::errors::LookupError;
use crate::types::OnboardingRequest;

/// Result of a domain-trust probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainCheck {
    /// The domain serves a reachable website.
    pub website_resolves: bool,
    /// The website presents a valid TLS certificate.
    pub has_tls: bool,
    /// The domain publishes MX records.
    pub has_mx: bool,
    /// The top-level domain is on the trusted list.
    pub tld_trusted: bool,
}

/// Domain infrastructure intelligence.
pub trait DomainIntel: Send + Sync {
    fn check(&self, domain: &str) -> Result<DomainCheck, LookupError>;
}

/// Document-level sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Mixed,
    Negative,
}

/// Result of free-text analysis over a business description.
#[derive(Debug, Clone, PartialEq)]
pub struct NlpAnalysis {
    pub sentiment: Sentiment,
    /// Salient phrases, lowercased.
    pub key_phrases: Vec<String>,
    /// Named entities mentioned in the text.
    pub entities: Vec<String>,
}

/// Natural-language analysis of submitted text.
pub trait NlpIntel: Send + Sync {
    fn analyze(&self, text: &str) -> Result<NlpAnalysis, LookupError>;
}

/// Read access to previously submitted requests.
pub trait HistoryStore: Send + Sync {
    /// Requests submitted within `window_secs` before `now`, newest first,
    /// at most `limit` rows.
    fn recent_requests(
        &self,
        now: i64,
        window_secs: i64,
        limit: u32,
    ) -> Result<Vec<OnboardingRequest>, LookupError>;
}
