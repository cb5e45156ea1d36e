//! Backend selection logic.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::memory::InMemoryBackend;
use super::noop::NoopBackend;
use super::{BackendError, WindowBackend};

#[cfg(unix)]
use super::hyprland::HyprlandBackend;

/// Which backend to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Detect the running compositor.
    #[default]
    Auto,
    Hyprland,
    /// In-memory windows loaded from a fixture file.
    Memory,
    Noop,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Auto => "auto",
            BackendKind::Hyprland => "hyprland",
            BackendKind::Memory => "memory",
            BackendKind::Noop => "noop",
        };
        f.write_str(name)
    }
}

/// Create the backend for `kind`.
///
/// `Auto` tries Hyprland (via HYPRLAND_INSTANCE_SIGNATURE) and falls back to
/// [`NoopBackend`], so the service can be registered on any session.
/// `Memory` requires a fixture path.
pub fn detect_backend(
    kind: BackendKind,
    fixture: Option<&Path>,
) -> Result<Arc<dyn WindowBackend>, BackendError> {
    match kind {
        BackendKind::Auto => {
            if let Some(backend) = hyprland() {
                info!("Detected Hyprland compositor");
                return Ok(backend);
            }
            warn!("No supported compositor detected, serving an empty window set");
            Ok(Arc::new(NoopBackend))
        }
        BackendKind::Hyprland => hyprland().ok_or_else(|| {
            BackendError::Unavailable("HYPRLAND_INSTANCE_SIGNATURE is not set".to_string())
        }),
        BackendKind::Memory => {
            let path = fixture.ok_or_else(|| {
                BackendError::Fixture("the memory backend needs a fixture file".to_string())
            })?;
            let backend = InMemoryBackend::load_fixture(path)?;
            info!(path = %path.display(), "Using in-memory backend");
            Ok(Arc::new(backend))
        }
        BackendKind::Noop => Ok(Arc::new(NoopBackend)),
    }
}

#[cfg(unix)]
fn hyprland() -> Option<Arc<dyn WindowBackend>> {
    HyprlandBackend::new().map(|b| Arc::new(b) as Arc<dyn WindowBackend>)
}

#[cfg(not(unix))]
fn hyprland() -> Option<Arc<dyn WindowBackend>> {
    None
}
