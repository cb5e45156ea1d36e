use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::backend::BackendKind;
use crate::config::ServiceConfig;
use crate::ipc::{WindowGeometry, WindowRecord, client};

#[derive(Parser)]
#[command(name = "windowctl")]
#[command(about = "List and place desktop windows over D-Bus")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the window control service (default)
    Serve {
        /// Windowing backend to use
        #[arg(long, value_enum)]
        backend: Option<BackendKind>,
        /// Window fixture for the memory backend
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Print the number of monitors
    Monitors,
    /// List top-level windows
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Move and resize the newest window of a class
    #[command(allow_negative_numbers = true)]
    SetGeom {
        /// Exact window class to match
        class: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        /// Minimize the window before moving it
        #[arg(long)]
        minimize: bool,
    },
}

impl Commands {
    /// Apply `serve` flags on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Commands::Serve { backend, fixture } = self {
            if let Some(backend) = backend {
                config.backend = *backend;
            }
            if let Some(fixture) = fixture {
                config.fixture = Some(fixture.clone());
            }
        }
    }
}

/// Handle a client command by calling the running service.
///
/// Returns `false` when `set-geom` found no matching window.
pub async fn handle_client_command(cmd: Commands, config: &ServiceConfig) -> Result<bool> {
    let connection = client::connect(config)
        .await
        .context("Failed to connect to the message bus")?;

    if !client::is_service_running(&connection, &config.bus_name).await? {
        anyhow::bail!(
            "windowctl service is not running. Start it first by running: windowctl serve"
        );
    }

    let proxy = client::window_ctl(&connection, config).await?;

    match cmd {
        Commands::Serve { .. } => anyhow::bail!("serve is not a client command"),
        Commands::Monitors => {
            println!("{}", proxy.get_num_monitors().await?);
            Ok(true)
        }
        Commands::List { json } => {
            let windows = proxy.list_windows().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else {
                print!("{}", format_window_table(&windows));
            }
            Ok(true)
        }
        Commands::SetGeom {
            class,
            x,
            y,
            width,
            height,
            minimize,
        } => {
            let geometry = WindowGeometry {
                x,
                y,
                width,
                height,
                minimized: minimize,
            };
            let success = proxy.set_window_geom_by_class(&class, geometry).await?;
            if !success {
                eprintln!("No window with class '{}'", class);
            }
            Ok(success)
        }
    }
}

/// Render windows as an aligned text table.
pub fn format_window_table(windows: &[WindowRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>7} {:>6} {:>6} {:>6} {:>6} {:>4}  {:<24} {}",
        "SEQ", "PID", "X", "Y", "WIDTH", "HEIGHT", "MIN", "CLASS", "APP ID"
    );
    for w in windows {
        let g = &w.geometry;
        let _ = writeln!(
            out,
            "{:>5} {:>7} {:>6} {:>6} {:>6} {:>6} {:>4}  {:<24} {}",
            w.stable_sequence,
            w.process_id,
            g.x,
            g.y,
            g.width,
            g.height,
            if g.minimized { "yes" } else { "no" },
            w.window_class,
            w.app_id
        );
    }
    out
}
