//! Top-level Veritas configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, DecisionThresholds, SignalWeights, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VERITAS_*`)
/// 3. Project config (`veritas.toml` in the working root)
/// 4. User config (`~/.veritas/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VeritasConfig {
    pub weights: SignalWeights,
    pub thresholds: DecisionThresholds,
    pub analysis: AnalysisConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub analyzer_timeout_ms: Option<u64>,
    pub history_window_hours: Option<u32>,
}

impl VeritasConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("veritas.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &VeritasConfig) -> Result<(), ConfigError> {
        let sum = config.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::WeightSum { sum });
        }

        let bands = [
            config.thresholds.effective_standard_review(),
            config.thresholds.effective_enhanced_due_diligence(),
            config.thresholds.effective_manual_review(),
            config.thresholds.effective_blocked(),
        ];
        for pair in bands.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ConfigError::InvalidValue {
                    field: "thresholds".to_string(),
                    message: "bands must be strictly ascending".to_string(),
                });
            }
        }
        if bands[0] <= 0.0 || bands[3] >= 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "thresholds".to_string(),
                message: "bands must lie strictly inside (0.0, 1.0)".to_string(),
            });
        }

        if config.analysis.effective_analyzer_timeout_ms() == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.analyzer_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let floor = config.analysis.effective_trust_floor();
        let ceiling = config.analysis.effective_trust_ceiling();
        if !(0.0..1.0).contains(&floor) || !(0.0..=1.0).contains(&ceiling) || floor >= ceiling {
            return Err(ConfigError::InvalidValue {
                field: "analysis.trust_floor".to_string(),
                message: "trust clamp must satisfy 0.0 <= floor < ceiling <= 1.0".to_string(),
            });
        }
        let start = config.analysis.effective_business_hours_start();
        let end = config.analysis.effective_business_hours_end();
        if start >= end || end > 24 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.business_hours_start".to_string(),
                message: "business hours must satisfy start < end <= 24".to_string(),
            });
        }
        if config.storage.effective_read_pool_size() == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VeritasConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file_config: VeritasConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a `Some` value.
    fn merge(base: &mut VeritasConfig, other: &VeritasConfig) {
        // Weights
        if other.weights.network.is_some() {
            base.weights.network = other.weights.network;
        }
        if other.weights.entity.is_some() {
            base.weights.entity = other.weights.entity;
        }
        if other.weights.behavioral.is_some() {
            base.weights.behavioral = other.weights.behavioral;
        }
        if other.weights.payment.is_some() {
            base.weights.payment = other.weights.payment;
        }
        if other.weights.legal.is_some() {
            base.weights.legal = other.weights.legal;
        }
        if other.weights.fraud.is_some() {
            base.weights.fraud = other.weights.fraud;
        }
        if other.weights.content.is_some() {
            base.weights.content = other.weights.content;
        }

        // Thresholds
        if other.thresholds.standard_review.is_some() {
            base.thresholds.standard_review = other.thresholds.standard_review;
        }
        if other.thresholds.enhanced_due_diligence.is_some() {
            base.thresholds.enhanced_due_diligence = other.thresholds.enhanced_due_diligence;
        }
        if other.thresholds.manual_review.is_some() {
            base.thresholds.manual_review = other.thresholds.manual_review;
        }
        if other.thresholds.blocked.is_some() {
            base.thresholds.blocked = other.thresholds.blocked;
        }

        // Analysis
        if other.analysis.analyzer_timeout_ms.is_some() {
            base.analysis.analyzer_timeout_ms = other.analysis.analyzer_timeout_ms;
        }
        if other.analysis.history_window_hours.is_some() {
            base.analysis.history_window_hours = other.analysis.history_window_hours;
        }
        if other.analysis.history_limit.is_some() {
            base.analysis.history_limit = other.analysis.history_limit;
        }
        if other.analysis.trust_floor.is_some() {
            base.analysis.trust_floor = other.analysis.trust_floor;
        }
        if other.analysis.trust_ceiling.is_some() {
            base.analysis.trust_ceiling = other.analysis.trust_ceiling;
        }
        if other.analysis.business_hours_start.is_some() {
            base.analysis.business_hours_start = other.analysis.business_hours_start;
        }
        if other.analysis.business_hours_end.is_some() {
            base.analysis.business_hours_end = other.analysis.business_hours_end;
        }
        if other.analysis.burst_threshold.is_some() {
            base.analysis.burst_threshold = other.analysis.burst_threshold;
        }
        if other.analysis.burst_window_mins.is_some() {
            base.analysis.burst_window_mins = other.analysis.burst_window_mins;
        }
        if other.analysis.similarity_threshold.is_some() {
            base.analysis.similarity_threshold = other.analysis.similarity_threshold;
        }
        if other.analysis.ip_cluster_min.is_some() {
            base.analysis.ip_cluster_min = other.analysis.ip_cluster_min;
        }
        if other.analysis.shared_domain_min.is_some() {
            base.analysis.shared_domain_min = other.analysis.shared_domain_min;
        }

        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VERITAS_ANALYZER_TIMEOUT_MS`, `VERITAS_DB_PATH`, etc.
    fn apply_env_overrides(config: &mut VeritasConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("VERITAS_ANALYZER_TIMEOUT_MS") {
            let v = val.parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
                var: "VERITAS_ANALYZER_TIMEOUT_MS".to_string(),
                message: e.to_string(),
            })?;
            config.analysis.analyzer_timeout_ms = Some(v);
        }
        if let Ok(val) = std::env::var("VERITAS_HISTORY_WINDOW_HOURS") {
            let v = val.parse::<u32>().map_err(|e| ConfigError::InvalidEnv {
                var: "VERITAS_HISTORY_WINDOW_HOURS".to_string(),
                message: e.to_string(),
            })?;
            config.analysis.history_window_hours = Some(v);
        }
        if let Ok(val) = std::env::var("VERITAS_SIMILARITY_THRESHOLD") {
            let v = val.parse::<f64>().map_err(|e| ConfigError::InvalidEnv {
                var: "VERITAS_SIMILARITY_THRESHOLD".to_string(),
                message: e.to_string(),
            })?;
            config.analysis.similarity_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("VERITAS_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("VERITAS_READ_POOL_SIZE") {
            let v = val.parse::<usize>().map_err(|e| ConfigError::InvalidEnv {
                var: "VERITAS_READ_POOL_SIZE".to_string(),
                message: e.to_string(),
            })?;
            config.storage.read_pool_size = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut VeritasConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.analyzer_timeout_ms {
            config.analysis.analyzer_timeout_ms = Some(v);
        }
        if let Some(v) = cli.history_window_hours {
            config.analysis.history_window_hours = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.veritas/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".veritas").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
