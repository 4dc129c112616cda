//! Configuration for ard-dashboard
//!
//! Loaded from `dashboard.toml` (see `ard_common::config::resolve_config_path`);
//! every field has a built-in default so an absent file yields a working service.

use ard_common::config::{LoggingConfig, ServerConfig};
use ard_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::services::catalog::ModelDescriptor;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ARD_CONFIG";

/// Config file name looked up under the user config directory
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Top-level dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub intake: IntakeConfig,
    pub timing: TimingConfig,
    pub executor: ExecutorConfig,
    /// Replaces the built-in catalog when present
    pub models: Option<Vec<ModelDescriptor>>,
}

/// File intake limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum accepted size in bytes (default 10 MiB)
    pub max_file_size_bytes: u64,
    /// Accepted types in HTML `accept` attribute form
    pub accepted_types: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            accepted_types: "image/*,application/pdf,text/plain".to_string(),
        }
    }
}

/// Progress simulation timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Upload ticker period (ms)
    pub upload_tick_ms: u64,
    /// Progress added per upload tick
    pub upload_step: f64,
    /// Processing ticker period (ms)
    pub processing_tick_ms: u64,
    /// Upper bound of the uniform random step per processing tick
    pub processing_max_step: f64,
    /// Progress ceiling while the executor is outstanding
    pub processing_ceiling: f64,
    /// Fixed seed for the processing step generator (None = entropy)
    pub progress_seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            upload_tick_ms: 300,
            upload_step: 10.0,
            processing_tick_ms: 500,
            processing_max_step: 15.0,
            processing_ceiling: 95.0,
            progress_seed: None,
        }
    }
}

impl TimingConfig {
    pub fn upload_period(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    pub fn processing_period(&self) -> Duration {
        Duration::from_millis(self.processing_tick_ms)
    }
}

/// Which analysis executor backs the workflow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// Canned results after a fixed delay
    #[default]
    Mock,
    /// HTTP inference service
    Remote,
}

/// Analysis executor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorConfig {
    pub kind: ExecutorKind,
    /// Mock settle delay (ms)
    pub mock_delay_ms: u64,
    /// Remote inference endpoint (required for `remote`)
    pub endpoint: Option<String>,
    /// Remote request timeout (ms)
    pub timeout_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            kind: ExecutorKind::Mock,
            mock_delay_ms: 2000,
            endpoint: None,
            timeout_ms: 30_000,
        }
    }
}

impl DashboardConfig {
    /// Reject settings the workflow cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.event_capacity == 0 {
            return Err(Error::Config("server.event_capacity must be > 0".to_string()));
        }
        if self.intake.max_file_size_bytes == 0 {
            return Err(Error::Config("intake.max_file_size_bytes must be > 0".to_string()));
        }
        if self
            .intake
            .accepted_types
            .split(',')
            .all(|entry| entry.trim().is_empty())
        {
            return Err(Error::Config("intake.accepted_types must list at least one type".to_string()));
        }
        if self.timing.upload_tick_ms == 0 || self.timing.processing_tick_ms == 0 {
            return Err(Error::Config("timing tick periods must be > 0".to_string()));
        }
        if !(self.timing.upload_step.is_finite() && self.timing.upload_step > 0.0) {
            return Err(Error::Config("timing.upload_step must be finite and > 0".to_string()));
        }
        if !(0.0..100.0).contains(&self.timing.processing_ceiling) {
            return Err(Error::Config(
                "timing.processing_ceiling must be within [0, 100)".to_string(),
            ));
        }
        if !(self.timing.processing_max_step.is_finite() && self.timing.processing_max_step >= 0.0) {
            return Err(Error::Config(
                "timing.processing_max_step must be finite and >= 0".to_string(),
            ));
        }
        if self.executor.kind == ExecutorKind::Remote {
            match self.executor.endpoint.as_deref() {
                Some(endpoint) if !endpoint.trim().is_empty() => {}
                _ => {
                    return Err(Error::Config(
                        "executor.endpoint is required when executor.kind = \"remote\"".to_string(),
                    ))
                }
            }
        }
        if let Some(models) = &self.models {
            if models.is_empty() {
                return Err(Error::Config("models must not be empty when given".to_string()));
            }
            let mut seen = HashSet::new();
            for model in models {
                if !seen.insert(model.id.as_str()) {
                    return Err(Error::Config(format!("duplicate model id: {}", model.id)));
                }
            }
        }
        Ok(())
    }
}
