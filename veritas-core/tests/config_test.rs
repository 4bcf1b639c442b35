//! Integration tests for layered configuration loading and validation.

use veritas_core::config::{CliOverrides, VeritasConfig};
use veritas_core::errors::ConfigError;
use veritas_core::types::{DecisionOutcome, SignalKind};

#[test]
fn defaults_validate_cleanly() {
    let config = VeritasConfig::default();
    assert!(VeritasConfig::validate(&config).is_ok());
    assert!((config.weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn partial_weight_override_keeps_other_defaults() {
    // Shift weight from entity to network, keeping the sum at 1.0.
    let config = VeritasConfig::from_toml(
        r#"
        [weights]
        network = 0.25
        entity = 0.20
        "#,
    )
    .unwrap();

    assert_eq!(config.weights.effective(SignalKind::Network), 0.25);
    assert_eq!(config.weights.effective(SignalKind::Entity), 0.20);
    assert_eq!(config.weights.effective(SignalKind::Legal), 0.15);
}

#[test]
fn weight_sum_violation_is_rejected() {
    let result = VeritasConfig::from_toml(
        r#"
        [weights]
        entity = 0.50
        "#,
    );
    assert!(matches!(result, Err(ConfigError::WeightSum { .. })));
}

#[test]
fn threshold_bands_must_ascend() {
    let result = VeritasConfig::from_toml(
        r#"
        [thresholds]
        manual_review = 0.9
        blocked = 0.8
        "#,
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn zero_timeout_is_rejected() {
    let result = VeritasConfig::from_toml(
        r#"
        [analysis]
        analyzer_timeout_ms = 0
        "#,
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = VeritasConfig::from_toml("weights = not-a-table");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn project_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("veritas.toml"),
        r#"
        [analysis]
        analyzer_timeout_ms = 2500

        [storage]
        read_pool_size = 8
        "#,
    )
    .unwrap();

    let config = VeritasConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.analysis.effective_analyzer_timeout_ms(), 2500);
    assert_eq!(config.storage.effective_read_pool_size(), 8);
    // Untouched knobs keep their defaults.
    assert_eq!(config.analysis.effective_history_window_hours(), 24);
}

#[test]
fn cli_overrides_beat_project_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("veritas.toml"),
        r#"
        [analysis]
        analyzer_timeout_ms = 2500
        "#,
    )
    .unwrap();

    let cli = CliOverrides {
        analyzer_timeout_ms: Some(1000),
        ..CliOverrides::default()
    };
    let config = VeritasConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.analysis.effective_analyzer_timeout_ms(), 1000);
}

#[test]
fn default_thresholds_match_decision_bands() {
    let config = VeritasConfig::default();
    assert_eq!(config.thresholds.classify(0.1), DecisionOutcome::AutoApprove);
    assert_eq!(config.thresholds.classify(0.85), DecisionOutcome::Blocked);
}

#[test]
fn config_roundtrips_through_toml() {
    let config = VeritasConfig::from_toml(
        r#"
        [analysis]
        similarity_threshold = 0.9
        "#,
    )
    .unwrap();
    let serialized = config.to_toml().unwrap();
    let reparsed = VeritasConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.analysis.effective_similarity_threshold(), 0.9);
}
