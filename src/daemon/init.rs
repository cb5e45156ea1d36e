//! Daemon initialization functions.
//!
//! Handles setting up logging and the windowing backend.

use anyhow::{Context, Result};
use tracing::info;

use crate::backend::detect_backend;
use crate::config::ServiceConfig;
use crate::service::WindowControlService;

/// Initialize the tracing subscriber for logging.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // By default, only log from the windowctl crate at info level
    // Users can override with RUST_LOG environment variable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("windowctl=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Create the configured backend and wrap it in the service.
pub fn init_service(config: &ServiceConfig) -> Result<WindowControlService> {
    let backend = detect_backend(config.backend, config.fixture.as_deref())
        .with_context(|| format!("Failed to initialize the {} backend", config.backend))?;
    let service = WindowControlService::new(backend);
    info!(backend = service.backend_name(), "Initialized window backend");
    Ok(service)
}
