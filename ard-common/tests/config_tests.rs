//! Unit tests for config file resolution and TOML loading
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate ARD_CONFIG are marked with #[serial].

use ard_common::config::{load_toml_config, resolve_config_path, LoggingConfig, ServerConfig};
use serde::Deserialize;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SampleConfig {
    server: ServerConfig,
    logging: LoggingConfig,
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_argument() {
    env::set_var("ARD_CONFIG_TEST", "/tmp/from-env.toml");

    let resolved = resolve_config_path(None, "ARD_CONFIG_TEST", "dashboard.toml");
    assert_eq!(resolved, Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var("ARD_CONFIG_TEST");
}

#[test]
#[serial]
fn test_cli_argument_overrides_env_var() {
    env::set_var("ARD_CONFIG_TEST", "/tmp/from-env.toml");

    let cli = PathBuf::from("/tmp/from-cli.toml");
    let resolved = resolve_config_path(Some(&cli), "ARD_CONFIG_TEST", "dashboard.toml");
    assert_eq!(resolved, Some(cli));

    env::remove_var("ARD_CONFIG_TEST");
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var("ARD_CONFIG_TEST", "   ");

    let resolved = resolve_config_path(None, "ARD_CONFIG_TEST", "no-such-file-ard-test.toml");
    assert_ne!(resolved, Some(PathBuf::from("   ")));

    env::remove_var("ARD_CONFIG_TEST");
}

#[test]
fn test_partial_toml_keeps_defaults_for_missing_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dashboard.toml");
    std::fs::write(&path, "[server]\nport = 6000\n").unwrap();

    let config: SampleConfig = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.server.port, 6000);
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dashboard.toml");
    std::fs::write(&path, "\n").unwrap();

    let config: SampleConfig = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.server, ServerConfig::default());
}

#[test]
fn test_explicit_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let result: ard_common::Result<SampleConfig> = load_toml_config(Some(&path));
    assert!(matches!(result, Err(ard_common::Error::Config(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    let result: ard_common::Result<SampleConfig> = load_toml_config(Some(&path));
    assert!(matches!(result, Err(ard_common::Error::TomlParse(_))));
}
