//! Lifecycle orchestration for the Veritas risk engine.
//!
//! The controller takes an onboarding request from submission through
//! parallel analysis to a persisted, audited decision.

pub mod controller;
pub mod fanout;
pub mod telemetry;

pub use controller::{OnboardingController, RequestStatus};
