//! Command-line interface for ranking Destinate candidate destinations.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

use rank::RankArgs;

const ARG_RANK_REQUEST: &str = "request";
const ARG_RANK_PRESET: &str = "preset";
const ARG_RANK_PRICE_WEIGHT: &str = "price-weight";
const ARG_RANK_RATING_WEIGHT: &str = "rating-weight";
const ARG_RANK_RATING_COUNT_WEIGHT: &str = "rating-count-weight";
const ARG_RANK_DISTANCE_WEIGHT: &str = "distance-weight";
const ARG_RANK_TOP: &str = "top";
const ARG_RANK_OUTPUT: &str = "output";
const ENV_RANK_REQUEST: &str = "DESTINATE_CMDS_RANK_REQUEST_PATH";

/// Run the Destinate CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration loading,
/// ranking, or writing the report fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "destinate",
    about = "Rank candidate destinations by price, rating, popularity and distance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the candidates in a JSON request with AHP weights and TOPSIS.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
