//! Command-line interface for the Savour recommender and its evaluator.
//!
//! `savour recommend` ranks restaurants from a CSV dataset and prints the
//! result as CSV; `savour evaluate` runs the offline hit-rate and A/B
//! measurements and writes a Markdown report. Every option can come from
//! CLI flags, configuration files, or `SAVOUR_CMDS_*` environment
//! variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod dataset;
mod error;
mod evaluate;
mod files;
mod recommend;

pub use error::CliError;

use evaluate::{EvaluateArgs, run_evaluate};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_CUISINES: &str = "cuisines";
pub(crate) const ARG_BUDGET_LOW: &str = "budget-low";
pub(crate) const ARG_BUDGET_HIGH: &str = "budget-high";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_TOP_N: &str = "top-n";
pub(crate) const ARG_RATING_WEIGHT: &str = "rating-weight";
pub(crate) const ARG_REPORT: &str = "report";
pub(crate) const ARG_SAMPLE_SIZE: &str = "sample-size";
pub(crate) const ARG_COHORT_SPLIT: &str = "cohort-split";
pub(crate) const ARG_ALT_RATING_WEIGHT: &str = "alt-rating-weight";
pub(crate) const ARG_HIT_RATE_SEED: &str = "hit-rate-seed";
pub(crate) const ARG_COHORT_SEED: &str = "cohort-seed";
pub(crate) const ARG_SURVEY_SEED: &str = "survey-seed";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "SAVOUR_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_EVALUATE_DATASET: &str = "SAVOUR_CMDS_EVALUATE_DATASET";

/// Run the Savour CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// dataset cannot be loaded, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Evaluate(args) => run_evaluate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "savour",
    about = "Preference-based restaurant recommendations and offline evaluation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank restaurants that match a set of preferences.
    Recommend(RecommendArgs),
    /// Measure hit rate and simulated satisfaction, then write a report.
    Evaluate(EvaluateArgs),
}

#[cfg(test)]
mod tests;
