//! Configuration system for Veritas.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod storage_config;
pub mod thresholds;
pub mod veritas_config;
pub mod weights;

pub use analysis_config::AnalysisConfig;
pub use storage_config::StorageConfig;
pub use thresholds::DecisionThresholds;
pub use veritas_config::{CliOverrides, VeritasConfig};
pub use weights::SignalWeights;
