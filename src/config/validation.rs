//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use zbus::names::WellKnownName;
use zbus::zvariant::ObjectPath;

use crate::backend::BackendKind;

use super::types::ServiceConfig;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

/// Validate the entire config, returning warnings for non-fatal issues.
///
/// This function checks for:
/// - Malformed well-known bus names
/// - Malformed object paths
/// - A memory backend without a fixture
pub fn validate_config(config: &ServiceConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if let Err(e) = WellKnownName::try_from(config.bus_name.as_str()) {
        warnings.push(ValidationWarning {
            field: "bus_name".to_string(),
            message: format!(
                "'{}' is not a valid well-known bus name ({}). Registration will fail.",
                config.bus_name, e
            ),
        });
    }

    if let Err(e) = ObjectPath::try_from(config.object_path.as_str()) {
        warnings.push(ValidationWarning {
            field: "object_path".to_string(),
            message: format!(
                "'{}' is not a valid object path ({}). Registration will fail.",
                config.object_path, e
            ),
        });
    }

    if config.backend == BackendKind::Memory && config.fixture.is_none() {
        warnings.push(ValidationWarning {
            field: "fixture".to_string(),
            message: "The memory backend needs a fixture file.".to_string(),
        });
    }

    warnings
}
