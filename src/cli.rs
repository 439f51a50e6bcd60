//! CLI argument parsing for the eld-trip-planner binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eld-trip-planner", about = "HOS-compliant trip planner API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the API server (default if no subcommand given)
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,
    },
}
