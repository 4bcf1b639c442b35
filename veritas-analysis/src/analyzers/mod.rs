//! The seven signal analyzers.

pub mod behavioral;
pub mod content;
pub mod entity;
pub mod legal;
pub mod network;
pub mod payment;
pub mod registry;
pub mod traits;
pub mod trust;

pub use registry::AnalyzerRegistry;
pub use traits::SignalAnalyzer;
