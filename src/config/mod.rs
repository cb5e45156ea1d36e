//! Service configuration.
//!
//! Settings are read once at startup from `~/.config/windowctl/config.toml`
//! (or an explicit `--config` path) and passed down by value.

mod types;
mod validation;

pub use types::{BusKind, DEFAULT_BUS_NAME, DEFAULT_OBJECT_PATH, ServiceConfig};
pub use validation::{ValidationWarning, validate_config};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("windowctl"))
}

/// Parse a config file's contents.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::ParseFailed)
}

fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load the service config.
///
/// An explicit `path` must exist and parse. Without one, the default file is
/// optional: if it is missing or broken the defaults are used and a warning
/// is logged.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    if let Some(path) = path {
        let config = read_config(path)?;
        tracing::info!("Loaded config from {:?}", path);
        return Ok(config);
    }

    let Some(config_path) = config_dir().map(|p| p.join("config.toml")) else {
        tracing::debug!("No config directory, using defaults");
        return Ok(ServiceConfig::default());
    };

    if !config_path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ServiceConfig::default());
    }

    match read_config(&config_path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!("{}, using defaults", e);
            Ok(ServiceConfig::default())
        }
    }
}

/// Load the config and log any validation warnings.
pub fn init_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let config = load_config(path)?;

    for warning in validate_config(&config) {
        tracing::warn!("Config validation: {} - {}", warning.field, warning.message);
    }

    Ok(config)
}
