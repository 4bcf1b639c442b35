//! Stable machine-readable error codes.
//!
//! Codes are part of the persisted audit surface and must never change
//! once released.

/// Maps every error to a stable code for logs and stored audit rows.
pub trait VeritasErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const LOOKUP_UNAVAILABLE: &str = "LOOKUP_UNAVAILABLE";
pub const VALIDATION_DEFECT: &str = "VALIDATION_DEFECT";
pub const ANALYZER_ERROR: &str = "ANALYZER_ERROR";
pub const AGGREGATION_INVARIANT: &str = "AGGREGATION_INVARIANT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STATE_TRANSITION: &str = "STATE_TRANSITION";
