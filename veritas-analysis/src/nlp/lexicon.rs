//! Lexicon-based text analysis.

use veritas_core::errors::LookupError;
use veritas_core::traits::{NlpAnalysis, NlpIntel, Sentiment};

const POSITIVE_TERMS: &[&str] = &[
    "trusted", "reliable", "certified", "established", "award", "quality", "excellent",
    "professional", "reputable", "accredited",
];

const NEGATIVE_TERMS: &[&str] = &[
    "scam", "failed", "complaint", "dispute", "problem", "loss", "debt", "collapse",
    "terrible", "worst", "broke", "sued",
];

/// Maximum key phrases returned per document.
const KEY_PHRASE_CAP: usize = 20;

/// Deterministic lexicon-driven `NlpIntel` backend.
///
/// Sentiment is scored by counting positive and negative lexicon hits;
/// key phrases are the document's distinct bigrams; entities are runs of
/// capitalized words.
#[derive(Debug, Default)]
pub struct LexiconNlp;

impl LexiconNlp {
    pub fn new() -> Self {
        Self
    }

    fn sentiment(lowered: &str) -> Sentiment {
        let positive = POSITIVE_TERMS.iter().filter(|t| lowered.contains(*t)).count();
        let negative = NEGATIVE_TERMS.iter().filter(|t| lowered.contains(*t)).count();
        match (positive, negative) {
            (0, 0) => Sentiment::Neutral,
            (p, n) if n > 0 && n >= 2 * p => Sentiment::Negative,
            (p, n) if n > 0 && p > 0 => Sentiment::Mixed,
            (_, n) if n > 0 => Sentiment::Negative,
            _ => Sentiment::Positive,
        }
    }

    fn key_phrases(lowered: &str) -> Vec<String> {
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 3)
            .collect();
        let mut phrases = Vec::new();
        for pair in tokens.windows(2) {
            let phrase = format!("{} {}", pair[0], pair[1]);
            if !phrases.contains(&phrase) {
                phrases.push(phrase);
                if phrases.len() == KEY_PHRASE_CAP {
                    break;
                }
            }
        }
        phrases
    }

    fn entities(text: &str) -> Vec<String> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();
        for word in text.split_whitespace() {
            let cleaned = word.trim_matches(|c: char| !c.is_alphanumeric());
            let capitalized = cleaned.chars().next().is_some_and(|c| c.is_uppercase());
            if capitalized && cleaned.len() >= 2 {
                run.push(cleaned);
            } else {
                if run.len() >= 2 {
                    entities.push(run.join(" "));
                }
                run.clear();
            }
        }
        if run.len() >= 2 {
            entities.push(run.join(" "));
        }
        entities
    }
}

impl NlpIntel for LexiconNlp {
    fn analyze(&self, text: &str) -> Result<NlpAnalysis, LookupError> {
        let lowered = text.to_lowercase();
        Ok(NlpAnalysis {
            sentiment: Self::sentiment(&lowered),
            key_phrases: Self::key_phrases(&lowered),
            entities: Self::entities(text),
        })
    }
}
