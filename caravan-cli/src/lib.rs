//! Command-line interface for the caravan routing pipeline.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod solve;

pub use error::CliError;
pub(crate) use solve::SolveArgs;

pub(crate) const ARG_SOLVE_INSTANCE: &str = "instance";
pub(crate) const ENV_SOLVE_INSTANCE: &str = "CARAVAN_CMDS_SOLVE_INSTANCE_PATH";

/// Run the caravan CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "caravan",
    about = "Capacitated vehicle routing over CVRPLIB instances",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a CVRPLIB instance and print the per-vehicle routes.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
