//! Loading pod configuration from files or host-supplied JSON.

use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use pod_util::config_path_from_env;
use serde_json::Value;
use tracing::debug;

use super::{ConfigError, RegistrationPodConfig, interpolate_config, validate_config};

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "CASEPRO_POD_CONFIG_PATH";

/// Returns the default path for the registration pod configuration file.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = config_path_from_env(CONFIG_PATH_ENV) {
        return path;
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("casepro-pods")
        .join("registration.json")
}

/// Loads, interpolates, and validates configuration from a specific path.
pub fn load_config_from_path(path: &Path) -> Result<RegistrationPodConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "Loading registration pod configuration");
    let raw_config: Value = serde_json::from_str(&content)?;
    config_from_value(raw_config)
}

/// Builds a validated configuration from a raw JSON document.
pub fn config_from_value(raw_config: Value) -> Result<RegistrationPodConfig, ConfigError> {
    let mut config: RegistrationPodConfig = serde_json::from_value(raw_config)?;
    interpolate_config(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}
