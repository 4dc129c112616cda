//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// HTTP server bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (default 127.0.0.1)
    pub bind: String,
    /// HTTP port
    pub port: u16,
    /// EventBus channel capacity
    pub event_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5780,
            event_capacity: 100,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Default `EnvFilter` directive for a crate, used when `RUST_LOG` is unset
    pub fn filter_directive(&self, crate_target: &str) -> String {
        format!("{}={},ard_common={},tower_http=info", crate_target, self.level, self.level)
    }
}

/// Config file resolution following this priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `<user config dir>/ard/<file_name>` if it exists
///
/// Returns `None` when no file applies; callers fall back to built-in defaults.
pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    file_name: &str,
) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config directory
    let user_config = dirs::config_dir().map(|d| d.join("ard").join(file_name))?;
    if user_config.exists() {
        Some(user_config)
    } else {
        None
    }
}

/// Load a TOML config file, or defaults when no path is given
///
/// An explicitly named file that does not exist is an error. An empty file
/// yields defaults.
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("No config file found, using built-in defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        warn!("Config file {} is empty, using built-in defaults", path.display());
        return Ok(T::default());
    }

    let config = toml::from_str(&content)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
