//! Command-line interface for estimating campus walking routes.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod route;

pub use error::CliError;

use route::{RouteArgs, run_route};

pub(crate) const ARG_FROM: &str = "from";
pub(crate) const ARG_TO: &str = "to";
pub(crate) const ARG_POIS: &str = "pois";
pub(crate) const ENV_FROM: &str = "CAMPUSWALK_CMDS_ROUTE_FROM";
pub(crate) const ENV_TO: &str = "CAMPUSWALK_CMDS_ROUTE_TO";

/// Run the Campuswalk CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "campuswalk",
    about = "Estimate walking routes between campus landmarks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate a walking route between two coordinates.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
