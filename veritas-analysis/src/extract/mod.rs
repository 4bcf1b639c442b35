//! Evidence extraction: keyword scanning, regex patterns, text similarity.

pub mod keywords;
pub mod patterns;
pub mod similarity;

pub use keywords::{KeywordHit, KeywordScanner};
pub use similarity::{jaccard, normalized_fingerprint, token_set};
