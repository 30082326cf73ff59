use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "revere", about = "Bridges monitoring alerts to a public status page", version)]
pub struct Cli {
    /// Path to the configuration document.
    #[arg(long, default_value = "revere.yaml", global = true)]
    pub config: PathBuf,

    /// Raise logging verbosity beyond what the config file requests.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run component/group reconciliation once and exit.
    Prepare,
    /// Run the alert pipeline and the auxiliary HTTP endpoint until signalled.
    Serve,
    /// Print the build version.
    Version,
}
