pub mod commands;

use clap::{Parser, Subcommand};

/// Convergence verification harness for an eventually-consistent banking
/// deployment.
#[derive(Parser, Debug)]
#[command(name = "converge", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the end-to-end money transfer scenario
    Run(commands::run::RunArgs),

    /// Print the resolved service endpoint table
    Endpoints(commands::endpoints::EndpointsArgs),
}

/// Report a top-level error and exit non-zero.
pub fn handle_error(err: anyhow::Error) {
    eprintln!("error: {err:#}");
    std::process::exit(1);
}
