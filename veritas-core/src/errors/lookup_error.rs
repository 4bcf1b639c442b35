//! External-lookup errors.

use super::error_code::{self, VeritasErrorCode};

/// A collaborator lookup (domain intel, NLP, history) could not answer.
///
/// Always recoverable at the pipeline level: the fan-out substitutes the
/// neutral fallback signal instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Domain intelligence unavailable for {domain}: {message}")]
    DomainUnavailable { domain: String, message: String },

    #[error("Text analysis unavailable: {0}")]
    NlpUnavailable(String),

    #[error("History lookup unavailable: {0}")]
    HistoryUnavailable(String),
}

impl VeritasErrorCode for LookupError {
    fn error_code(&self) -> &'static str {
        error_code::LOOKUP_UNAVAILABLE
    }
}
