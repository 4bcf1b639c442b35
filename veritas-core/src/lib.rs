//! Core types, traits, errors, configuration, and events for the Veritas
//! vendor-onboarding risk engine.
//!
//! This crate has no analyzer logic and no I/O. Everything here is shared
//! vocabulary: the immutable data model, the external-lookup contracts,
//! one error enum per subsystem, and the lifecycle event dispatcher.

pub mod config;
pub mod errors;
pub mod events;
pub mod traits;
pub mod types;
