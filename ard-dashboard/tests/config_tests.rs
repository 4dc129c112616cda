//! Dashboard configuration loading tests
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate ARD_CONFIG are marked with #[serial].

use ard_common::config::{load_toml_config, resolve_config_path};
use ard_dashboard::config::{DashboardConfig, ExecutorKind, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

/// TC-CFG-001: ARD_CONFIG points at the file to load
#[test]
#[serial]
fn tc_cfg_001_env_var_config_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
        [server]
        port = 6100

        [intake]
        max_file_size_bytes = 1048576

        [timing]
        processing_tick_ms = 250
        progress_seed = 9
        "#,
    )
    .unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let resolved = resolve_config_path(None, CONFIG_ENV_VAR, CONFIG_FILE_NAME);
    let config: DashboardConfig = load_toml_config(resolved.as_deref()).unwrap();

    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.server.port, 6100);
    assert_eq!(config.intake.max_file_size_bytes, 1_048_576);
    assert_eq!(config.intake.accepted_types, "image/*,application/pdf,text/plain");
    assert_eq!(config.timing.processing_tick_ms, 250);
    assert_eq!(config.timing.upload_tick_ms, 300);
    assert_eq!(config.timing.progress_seed, Some(9));
    assert!(config.validate().is_ok());
}

/// TC-CFG-002: Remote executor section parses and validates
#[test]
fn tc_cfg_002_remote_executor_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
        [executor]
        kind = "remote"
        endpoint = "http://127.0.0.1:9000/analyze"
        timeout_ms = 5000
        "#,
    )
    .unwrap();

    let config: DashboardConfig = load_toml_config(Some(&path)).unwrap();

    assert_eq!(config.executor.kind, ExecutorKind::Remote);
    assert_eq!(config.executor.timeout_ms, 5000);
    assert!(config.validate().is_ok());
}

/// TC-CFG-003: Settings the workflow cannot run with are rejected
#[test]
fn tc_cfg_003_invalid_values_rejected() {
    let cases = [
        "[intake]\nmax_file_size_bytes = 0\n",
        "[intake]\naccepted_types = \" , \"\n",
        "[timing]\nprocessing_tick_ms = 0\n",
        "[timing]\nprocessing_ceiling = 100.0\n",
        "[timing]\nupload_step = 0.0\n",
        "[server]\nevent_capacity = 0\n",
        "[executor]\nkind = \"remote\"\n",
    ];

    for case in cases {
        let config: DashboardConfig = toml::from_str(case).unwrap();
        assert!(
            matches!(config.validate(), Err(ard_common::Error::Config(_))),
            "accepted invalid config:\n{}",
            case
        );
    }
}

/// TC-CFG-004: Unknown executor kind is a parse error
#[test]
fn tc_cfg_004_unknown_executor_kind() {
    let result: Result<DashboardConfig, _> = toml::from_str("[executor]\nkind = \"gpu\"\n");
    assert!(result.is_err());
}
