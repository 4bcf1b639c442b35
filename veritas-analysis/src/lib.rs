//! Signal analysis for the Veritas vendor-onboarding risk engine.
//!
//! Seven independent analyzers score an onboarding request on one axis
//! each; the aggregator combines them into a weighted profile and the
//! decision module maps the combined score onto an outcome band.

pub mod analyzers;
pub mod extract;
pub mod nlp;
pub mod scoring;
pub mod tables;
