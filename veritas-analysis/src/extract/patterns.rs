//! Regex extraction of legal and financial evidence from free text.

use std::sync::OnceLock;

use regex::Regex;

fn case_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b\d{2,4}-(?:cv|cr|md|bk)-\d{3,6}\b").unwrap_or_else(|_| {
            unreachable!("case number regex failed to compile")
        })
    })
}

fn monetary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\$\s?\d{1,3}(?:,\d{3})*(?:\.\d+)?\s*(?:million|billion|thousand|[mbk])?\b")
            .unwrap_or_else(|_| unreachable!("monetary regex failed to compile"))
    })
}

fn court_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:district|superior|supreme|circuit|federal|bankruptcy)\s+court\b")
            .unwrap_or_else(|_| unreachable!("court regex failed to compile"))
    })
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(19[0-9]{2}|20[0-9]{2})\b")
            .unwrap_or_else(|_| unreachable!("year regex failed to compile"))
    })
}

/// Docket-style case numbers, e.g. `2023-cv-01234`.
pub fn extract_case_numbers(text: &str) -> Vec<String> {
    case_number_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Monetary amounts, e.g. `$4.5 million`, `$120,000`.
pub fn extract_monetary_amounts(text: &str) -> Vec<String> {
    monetary_re()
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Court mentions, e.g. `federal court`, `District Court`.
pub fn extract_court_references(text: &str) -> Vec<String> {
    court_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Four-digit years (1900..=2099), ascending, deduplicated.
pub fn extract_years(text: &str) -> Vec<i32> {
    let mut years: Vec<i32> = year_re()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_numbers_normalize_to_lowercase() {
        let found = extract_case_numbers("See Case 2023-CV-01234 and 19-cr-556.");
        assert_eq!(found, vec!["2023-cv-01234", "19-cr-556"]);
    }

    #[test]
    fn monetary_amounts_with_scale_words() {
        let found = extract_monetary_amounts("fined $4.5 million, later paid $120,000");
        assert_eq!(found, vec!["$4.5 million", "$120,000"]);
    }

    #[test]
    fn court_references_match_known_levels() {
        let found = extract_court_references("filed in Federal Court, appealed to supreme court");
        assert_eq!(found, vec!["federal court", "supreme court"]);
    }

    #[test]
    fn years_are_sorted_and_deduplicated() {
        let found = extract_years("founded 2008, restructured 1999, expanded 2008");
        assert_eq!(found, vec![1999, 2008]);
    }

    #[test]
    fn unrelated_numbers_are_not_years() {
        assert!(extract_years("suite 12345, zip 98004-1852").is_empty());
    }
}
