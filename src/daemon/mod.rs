//! Daemon module for windowctl.
//!
//! The daemon is the long-running process that owns the bus registration
//! and answers window-control calls until it is asked to stop.

mod init;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ServiceConfig;
use crate::ipc::ServiceRegistration;

pub use init::{init_logging, init_service};

/// Run the window control service.
///
/// This is the main entry point when no subcommand is provided. It
/// registers the service, waits for SIGINT/SIGTERM, and unregisters before
/// returning, also when waiting for the signal failed.
pub async fn run(config: ServiceConfig) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting windowctl daemon"
    );

    let service = init::init_service(&config)?;

    let registration = match ServiceRegistration::start(&config, service).await {
        Ok(registration) => registration,
        Err(zbus::Error::NameTaken) => {
            anyhow::bail!("Another instance is already running as {}", config.bus_name)
        }
        Err(e) => return Err(e).context("Failed to register on the message bus"),
    };

    let waited = wait_for_shutdown().await;
    info!("Shutting down");

    registration
        .stop()
        .await
        .context("Failed to unregister from the message bus")?;

    waited
}

#[cfg(unix)]
async fn wait_for_shutdown() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.context("Failed to wait for Ctrl+C")?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for Ctrl+C")
}
