//! Configuration system tests
//!
//! Tests for config paths and engine config loading/saving.

use std::path::PathBuf;

use tabula::config::EngineConfig;
use tabula::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("tabula"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_snapshot_and_logs_are_under_config_dir() {
    let Some(config) = config_paths::config_dir() else {
        return;
    };
    assert!(config_paths::snapshot_file().unwrap().starts_with(&config));
    assert!(config_paths::logs_dir().unwrap().starts_with(&config));
}

// ========================================================================
// Engine Config Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = EngineConfig::default();
    assert!(config.seed_sample_data);
    assert!(config.export_dir.is_none());
    assert!(config.snapshot_path.is_none());
}

#[test]
fn test_config_serialize_deserialize() {
    let config = EngineConfig {
        seed_sample_data: false,
        export_dir: Some(PathBuf::from("/data/exports")),
        snapshot_path: Some(PathBuf::from("/data/table.json")),
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_unset_paths_are_not_written() {
    let yaml = serde_yaml::to_string(&EngineConfig::default()).unwrap();
    assert!(yaml.contains("seed_sample_data: true"));
    assert!(!yaml.contains("export_dir"));
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_configured_snapshot_path_wins() {
    let config = EngineConfig {
        snapshot_path: Some(PathBuf::from("mine.json")),
        ..EngineConfig::default()
    };
    assert_eq!(config.snapshot_path(), Some(PathBuf::from("mine.json")));
}
