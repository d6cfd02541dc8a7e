//! Command-line interface for querying a Ridepark park layout.
//!
//! Each subcommand loads a JSON layout into a fresh
//! [`Park`](ridepark_runtime::Park), runs one query and prints the result as
//! pretty JSON on stdout. Options layer CLI flags over `RIDEPARK_*`
//! environment variables and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod fs;
mod layout;

pub use error::CliError;
pub use layout::{CliPark, ParkLayout, RideVisit};

use commands::{PathArgs, QueuesArgs, StatsArgs, SuggestArgs, WaitTimesArgs};

pub(crate) const ARG_LAYOUT: &str = "layout";
pub(crate) const ARG_VISITOR: &str = "visitor";
pub(crate) const ARG_FROM: &str = "from";
pub(crate) const ARG_TO: &str = "to";
pub(crate) const ENV_WAIT_TIMES_LAYOUT: &str = "RIDEPARK_CMDS_WAIT_TIMES_LAYOUT";
pub(crate) const ENV_QUEUES_LAYOUT: &str = "RIDEPARK_CMDS_QUEUES_LAYOUT";
pub(crate) const ENV_STATS_LAYOUT: &str = "RIDEPARK_CMDS_STATS_LAYOUT";
pub(crate) const ENV_SUGGEST_LAYOUT: &str = "RIDEPARK_CMDS_SUGGEST_LAYOUT";
pub(crate) const ENV_SUGGEST_VISITOR: &str = "RIDEPARK_CMDS_SUGGEST_VISITOR";
pub(crate) const ENV_PATH_LAYOUT: &str = "RIDEPARK_CMDS_PATH_LAYOUT";
pub(crate) const ENV_PATH_FROM: &str = "RIDEPARK_CMDS_PATH_FROM";
pub(crate) const ENV_PATH_TO: &str = "RIDEPARK_CMDS_PATH_TO";

/// Run the Ridepark CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] describing the first failure.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::WaitTimes(args) => commands::run_wait_times_with(args, writer),
        Command::Suggest(args) => commands::run_suggest_with(args, writer),
        Command::Path(args) => commands::run_path_with(args, writer),
        Command::Stats(args) => commands::run_stats_with(args, writer),
        Command::Queues(args) => commands::run_queues_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ridepark",
    about = "Query ride waits, suggestions, walks and statistics for a park layout",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List operational rides by current wait, shortest first.
    WaitTimes(WaitTimesArgs),
    /// Recommend rides for a visitor.
    Suggest(SuggestArgs),
    /// Find the shortest walk between two rides.
    Path(PathArgs),
    /// Summarise visitors, rides and waits.
    Stats(StatsArgs),
    /// Show both queue lanes of every ride.
    Queues(QueuesArgs),
}

#[cfg(test)]
mod tests;
