//! Error handling for Veritas.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analyzer_error;
pub mod config_error;
pub mod error_code;
pub mod lookup_error;
pub mod pipeline_error;
pub mod storage_error;

pub use analyzer_error::AnalyzerError;
pub use config_error::ConfigError;
pub use error_code::VeritasErrorCode;
pub use lookup_error::LookupError;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalKind;

    #[test]
    fn analyzer_error_codes_distinguish_defects_from_lookups() {
        let lookup = AnalyzerError::Lookup(LookupError::NlpUnavailable("down".into()));
        assert_eq!(lookup.error_code(), error_code::LOOKUP_UNAVAILABLE);

        let defect = AnalyzerError::ValidationDefect {
            kind: SignalKind::Legal,
            message: "score 1.4 out of range".into(),
        };
        assert_eq!(defect.error_code(), error_code::VALIDATION_DEFECT);
    }

    #[test]
    fn pipeline_error_code_delegates_to_source() {
        let err = PipelineError::from(StorageError::PoolExhausted);
        assert_eq!(err.error_code(), error_code::STORAGE_ERROR);

        let err = PipelineError::AggregationInvariant("weights sum to 1.05".into());
        assert_eq!(err.error_code(), error_code::AGGREGATION_INVARIANT);
    }
}
