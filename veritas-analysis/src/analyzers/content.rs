//! Content analyzer.
//!
//! Scores the business description: negative or mixed sentiment plus
//! risky marketing phrases.

use std::sync::Arc;

use veritas_core::errors::AnalyzerError;
use veritas_core::traits::{NlpIntel, Sentiment};
use veritas_core::types::{Evidence, OnboardingRequest, RiskFactor, RiskSignal, SignalKind};

use crate::extract::{KeywordHit, KeywordScanner};
use crate::tables;

use super::traits::SignalAnalyzer;

const NEGATIVE_SENTIMENT_SEVERITY: f64 = 0.4;
const MIXED_SENTIMENT_SEVERITY: f64 = 0.2;
const RISKY_PHRASE_SEVERITY: f64 = 0.1;
/// Phrase contributions cap; sentiment can still push past this.
const RISKY_PHRASE_CAP: f64 = 0.3;
/// cap / severity: at most this many phrase factors count.
const MAX_PHRASE_FACTORS: usize = 3;

pub struct ContentAnalyzer {
    nlp: Arc<dyn NlpIntel>,
    risky_phrases: KeywordScanner,
}

impl ContentAnalyzer {
    pub fn new(nlp: Arc<dyn NlpIntel>) -> Self {
        Self {
            nlp,
            risky_phrases: KeywordScanner::new(tables::RISKY_CONTENT_PHRASES),
        }
    }
}

impl SignalAnalyzer for ContentAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Content
    }

    fn analyze(&self, request: &OnboardingRequest, _now: i64) -> Result<RiskSignal, AnalyzerError> {
        let analysis = self.nlp.analyze(&request.business_description)?;

        let mut score = 0.0;
        let mut factors = Vec::new();

        match analysis.sentiment {
            Sentiment::Negative => {
                score += NEGATIVE_SENTIMENT_SEVERITY;
                factors.push(RiskFactor::new("negative_sentiment", NEGATIVE_SENTIMENT_SEVERITY));
            }
            Sentiment::Mixed => {
                score += MIXED_SENTIMENT_SEVERITY;
                factors.push(RiskFactor::new("mixed_sentiment", MIXED_SENTIMENT_SEVERITY));
            }
            Sentiment::Positive | Sentiment::Neutral => {}
        }

        // Scan the raw description, then the NLP key phrases; a richer
        // backend can surface phrasing the raw scan misses. One factor
        // per distinct risky term.
        let mut matched: Vec<KeywordHit> = Vec::new();
        for hit in self.risky_phrases.scan(&request.business_description) {
            if matched.iter().all(|m| m.keyword != hit.keyword) {
                matched.push(hit);
            }
        }
        for phrase in &analysis.key_phrases {
            for keyword in self.risky_phrases.matched_keywords(phrase) {
                if matched.iter().all(|m| m.keyword != keyword) {
                    matched.push(KeywordHit {
                        keyword: keyword.to_string(),
                        context: phrase.clone(),
                    });
                }
            }
        }

        let counted = matched.len().min(MAX_PHRASE_FACTORS);
        for hit in matched.into_iter().take(counted) {
            factors.push(RiskFactor::with_evidence(
                format!("risky_phrase_{}", hit.keyword.replace(' ', "_")),
                RISKY_PHRASE_SEVERITY,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }
        score += (counted as f64 * RISKY_PHRASE_SEVERITY).min(RISKY_PHRASE_CAP);

        Ok(RiskSignal::new(SignalKind::Content, score, factors))
    }
}
