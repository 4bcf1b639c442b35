//! Analyzer errors.

use crate::types::SignalKind;

use super::error_code::{self, VeritasErrorCode};
use super::LookupError;

/// Errors raised by a signal analyzer.
///
/// A `ValidationDefect` means the analyzer produced an out-of-contract
/// value; it is logged loudly because it indicates a bug, but the pipeline
/// still degrades to the fallback signal rather than failing the request.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Analyzer {kind} produced out-of-contract output: {message}")]
    ValidationDefect { kind: SignalKind, message: String },

    #[error("Analyzer {kind} panicked: {message}")]
    Panicked { kind: SignalKind, message: String },

    #[error("Analyzer {kind} timed out after {timeout_ms}ms")]
    Timeout { kind: SignalKind, timeout_ms: u64 },
}

impl VeritasErrorCode for AnalyzerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Lookup(e) => e.error_code(),
            Self::ValidationDefect { .. } => error_code::VALIDATION_DEFECT,
            Self::Panicked { .. } | Self::Timeout { .. } => error_code::ANALYZER_ERROR,
        }
    }
}
