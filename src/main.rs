//! Converge CLI entry point.

use clap::Parser;

use converge::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => converge::cli::commands::run::execute(args).await,
        Commands::Endpoints(args) => converge::cli::commands::endpoints::execute(args).await,
    };

    if let Err(err) = result {
        converge::cli::handle_error(err);
    }
}
