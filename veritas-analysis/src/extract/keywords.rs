//! Multi-pattern keyword scanning with bounded context capture.

use aho_corasick::{AhoCorasick, MatchKind};
use smallvec::SmallVec;

/// Characters of surrounding text captured on each side of a match.
const CONTEXT_WINDOW: usize = 40;

/// One keyword match with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub keyword: String,
    pub context: String,
}

/// Case-insensitive multi-pattern scanner over a fixed keyword table.
///
/// Built once per table and reused across requests; construction compiles
/// the automaton, scanning is a single pass over the input.
pub struct KeywordScanner {
    automaton: AhoCorasick,
    keywords: Vec<&'static str>,
}

impl KeywordScanner {
    /// Build a scanner over a static keyword table.
    ///
    /// Leftmost-longest matching so overlapping table entries resolve to
    /// the most specific keyword.
    pub fn new(keywords: &[&'static str]) -> Self {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(keywords)
            .unwrap_or_else(|_| {
                // Tables are compile-time constants; a build failure is a
                // defect in the table itself.
                unreachable!("keyword table failed to compile")
            });
        Self {
            automaton,
            keywords: keywords.to_vec(),
        }
    }

    /// All hits in `text`, with a bounded context window around each.
    pub fn scan(&self, text: &str) -> SmallVec<[KeywordHit; 4]> {
        let mut hits = SmallVec::new();
        for m in self.automaton.find_iter(text) {
            let keyword = self.keywords[m.pattern().as_usize()].to_string();
            let context = context_window(text, m.start(), m.end());
            hits.push(KeywordHit { keyword, context });
        }
        hits
    }

    /// True when any table entry occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }

    /// Distinct keywords matched in `text`, deduplicated in table order.
    pub fn matched_keywords(&self, text: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.keywords.len()];
        for m in self.automaton.find_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }
        self.keywords
            .iter()
            .zip(&seen)
            .filter(|(_, hit)| **hit)
            .map(|(kw, _)| *kw)
            .collect()
    }
}

/// Extract a char-boundary-safe window around `[start, end)`.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(CONTEXT_WINDOW);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + CONTEXT_WINDOW).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].to_string()
}
