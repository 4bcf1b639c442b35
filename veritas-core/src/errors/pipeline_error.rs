//! Pipeline errors.

use crate::types::{RequestState, SignalKind};

use super::error_code::{self, VeritasErrorCode};
use super::{AnalyzerError, ConfigError, StorageError};

/// Errors that can fail a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Aggregation invariant violated: {0}")]
    AggregationInvariant(String),

    #[error("Missing signal {kind} at aggregation")]
    MissingSignal { kind: SignalKind },

    #[error("Illegal state transition from {from} to {to}")]
    IllegalTransition { from: RequestState, to: RequestState },
}

impl VeritasErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Analyzer(e) => e.error_code(),
            Self::AggregationInvariant(_) | Self::MissingSignal { .. } => {
                error_code::AGGREGATION_INVARIANT
            }
            Self::IllegalTransition { .. } => error_code::STATE_TRANSITION,
        }
    }
}
