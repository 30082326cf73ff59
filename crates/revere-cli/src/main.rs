mod cli;
mod commands;
mod pubsub;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Prepare => commands::prepare(&cli.config, cli.verbose).await,
        Command::Serve => commands::serve(&cli.config, cli.verbose).await,
        Command::Version => {
            commands::version();
            Ok(())
        }
    }
}
