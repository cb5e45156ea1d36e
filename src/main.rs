use std::process::ExitCode;

use clap::Parser;

use windowctl::cli::{Cli, Commands, handle_client_command};
use windowctl::config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve {
        backend: None,
        fixture: None,
    });

    if let Commands::Serve { .. } = command {
        windowctl::daemon::init_logging();
        let mut config = config::init_config(cli.config.as_deref())?;
        command.apply_overrides(&mut config);
        windowctl::daemon::run(config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = config::load_config(cli.config.as_deref())?;
    if handle_client_command(command, &config).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
