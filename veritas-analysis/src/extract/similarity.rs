//! Description similarity: token-set Jaccard with a fast exact-duplicate path.

use rustc_hash::FxHashSet;
use xxhash_rust::xxh3::xxh3_64;

/// Lowercased alphanumeric tokens of length >= 3.
///
/// Short tokens (articles, abbreviations) add noise without adding
/// discriminative power.
pub fn token_set(text: &str) -> FxHashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of two token sets. Empty-vs-empty is 0.0, not 1.0:
/// two blank descriptions carry no evidence of copying.
pub fn jaccard(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = (a.len() + b.len()) as f64 - intersection;
    intersection / union
}

/// Order-insensitive fingerprint of a description's token set.
///
/// Equal fingerprints short-circuit the Jaccard scan for verbatim or
/// reshuffled copies.
pub fn normalized_fingerprint(text: &str) -> u64 {
    let mut tokens: Vec<String> = token_set(text).into_iter().collect();
    tokens.sort_unstable();
    xxh3_64(tokens.join(" ").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_have_similarity_one() {
        let a = token_set("industrial pipe fittings wholesale");
        let b = token_set("industrial pipe fittings wholesale");
        assert_eq!(jaccard(&a, &b), 1.0);
    }

    #[test]
    fn disjoint_texts_have_similarity_zero() {
        let a = token_set("industrial pipe fittings");
        let b = token_set("organic coffee roasting");
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn near_copies_score_above_threshold() {
        let a = token_set(
            "premium consumer electronics wholesale distribution serving independent \
             retailers nationwide with fast shipping and dedicated support since 2010",
        );
        let b = token_set(
            "premium consumer electronics wholesale distribution serving independent \
             retailers nationwide with fast shipping and dedicated support since 2012",
        );
        assert!(jaccard(&a, &b) > 0.85);
    }

    #[test]
    fn empty_descriptions_do_not_match() {
        let a = token_set("");
        let b = token_set("");
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn fingerprint_ignores_token_order() {
        assert_eq!(
            normalized_fingerprint("wholesale industrial fittings"),
            normalized_fingerprint("fittings industrial wholesale")
        );
        assert_ne!(
            normalized_fingerprint("wholesale industrial fittings"),
            normalized_fingerprint("wholesale organic coffee")
        );
    }
}
