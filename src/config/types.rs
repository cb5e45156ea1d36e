//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// Default well-known name the service owns.
pub const DEFAULT_BUS_NAME: &str = "com.github.clueliss.WindowCtl";

/// Default object path the service is exported at.
pub const DEFAULT_OBJECT_PATH: &str = "/com/github/clueliss/WindowCtl";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Message bus to register on.
    pub bus: BusKind,
    /// Well-known name to request.
    pub bus_name: String,
    /// Object path to export the interface at.
    pub object_path: String,
    /// Windowing backend to use.
    pub backend: BackendKind,
    /// Window fixture for the memory backend.
    pub fixture: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bus: BusKind::Session,
            bus_name: DEFAULT_BUS_NAME.to_string(),
            object_path: DEFAULT_OBJECT_PATH.to_string(),
            backend: BackendKind::Auto,
            fixture: None,
        }
    }
}

/// Which message bus to connect to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    #[default]
    Session,
    System,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.bus, BusKind::Session);
        assert_eq!(config.bus_name, "com.github.clueliss.WindowCtl");
        assert_eq!(config.object_path, "/com/github/clueliss/WindowCtl");
        assert_eq!(config.backend, BackendKind::Auto);
        assert!(config.fixture.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("backend = \"noop\"").unwrap();
        assert_eq!(config.backend, BackendKind::Noop);
        assert_eq!(config.bus_name, DEFAULT_BUS_NAME);
    }

    #[test]
    fn test_full_config() {
        let config: ServiceConfig = toml::from_str(
            r#"
            bus = "system"
            bus_name = "org.example.Windows"
            object_path = "/org/example/Windows"
            backend = "memory"
            fixture = "/etc/windowctl/windows.toml"
            "#,
        )
        .unwrap();

        assert_eq!(config.bus, BusKind::System);
        assert_eq!(config.bus_name, "org.example.Windows");
        assert_eq!(config.object_path, "/org/example/Windows");
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(
            config.fixture,
            Some(PathBuf::from("/etc/windowctl/windows.toml"))
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result: Result<ServiceConfig, _> = toml::from_str("backend = \"sway\"");
        assert!(result.is_err());
    }
}
