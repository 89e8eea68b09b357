//! Recommend command implementation for the Savour CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use savour_core::{
    DEFAULT_TOP_N, Preferences, Query, Recommend, Recommendations, Recommender, ScoreWeights,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BUDGET_HIGH, ARG_BUDGET_LOW, ARG_CUISINES, ARG_DATASET, ARG_LOCATION, ARG_RATING_WEIGHT,
    ARG_TOP_N, CliError, ENV_RECOMMEND_DATASET, dataset,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank restaurants from a CSV dataset against cuisine, budget \
                 and location preferences. When nothing matches, the cuisine, \
                 budget and location preferences are relaxed in that order.",
    about = "Recommend restaurants"
)]
#[ortho_config(prefix = "SAVOUR")]
pub(crate) struct RecommendArgs {
    /// Path to the restaurant CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Comma-separated cuisines, any of which may match.
    #[arg(long = ARG_CUISINES, value_name = "list")]
    #[serde(default)]
    pub(crate) cuisines: Option<String>,
    /// Cheapest acceptable cost category (low, medium, high).
    #[arg(long = ARG_BUDGET_LOW, value_name = "category")]
    #[serde(default)]
    pub(crate) budget_low: Option<String>,
    /// Dearest acceptable cost category (low, medium, high).
    #[arg(long = ARG_BUDGET_HIGH, value_name = "category")]
    #[serde(default)]
    pub(crate) budget_high: Option<String>,
    /// City to search in; close misspellings are tolerated.
    #[arg(long = ARG_LOCATION, value_name = "city")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Maximum number of recommendations.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    /// Weight of the rating in the score; votes take the remainder.
    #[arg(long = ARG_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Path to the CSV dataset.
    pub(crate) dataset: Utf8PathBuf,
    /// Query built from the preference options.
    pub(crate) query: Query,
    /// Validated score weights.
    pub(crate) weights: ScoreWeights,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RECOMMEND_DATASET,
        })?;

        let mut preferences =
            Preferences::new().with_cuisines(split_list(args.cuisines.as_deref()));
        match (args.budget_low, args.budget_high) {
            (Some(low), Some(high)) => preferences = preferences.with_budget(low, high),
            (None, None) => {}
            _ => return Err(CliError::IncompleteBudget),
        }
        if let Some(location) = args.location {
            preferences = preferences.with_location(location);
        }
        let query = Query::new(preferences).with_top_n(args.top_n.unwrap_or(DEFAULT_TOP_N));
        let weights = weights_from(args.rating_weight)?;

        Ok(Self {
            dataset,
            query,
            weights,
        })
    }
}

/// Split a comma-separated option into its non-blank entries.
pub(crate) fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Weights giving `rating` to the rating and the remainder to votes.
#[expect(
    clippy::float_arithmetic,
    reason = "the vote weight is the complement of the rating weight"
)]
pub(crate) fn weights_from(rating_weight: Option<f64>) -> Result<ScoreWeights, CliError> {
    let Some(rating) = rating_weight else {
        return Ok(ScoreWeights::default());
    };
    ScoreWeights {
        rating,
        votes: 1.0 - rating,
    }
    .validate()
    .map_err(CliError::from)
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let results = execute_recommend(&config)?;
    write_recommendations(writer, &results)
}

fn execute_recommend(config: &RecommendConfig) -> Result<Recommendations, CliError> {
    let dataset = dataset::load_dataset(&config.dataset)?;
    let recommender = Recommender::with_weights(dataset, config.weights)?;
    let results = recommender.recommend(&config.query)?;
    log::info!(
        "{} recommendations from the {:?} stage",
        results.len(),
        results.stage()
    );
    Ok(results)
}

/// Write the header and one CSV row per recommendation.
///
/// The header is written even when there are no recommendations.
pub(crate) fn write_recommendations(
    writer: &mut dyn Write,
    results: &Recommendations,
) -> Result<(), CliError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(results.columns())
        .map_err(CliError::WriteRecommendations)?;
    for item in results.items() {
        let restaurant = &item.restaurant;
        let mut row = vec![
            restaurant.name.clone(),
            restaurant.city.clone(),
            restaurant.cuisine.clone(),
            restaurant.cost.to_string(),
            restaurant.rating.to_string(),
            restaurant.votes.to_string(),
        ];
        if results.includes_coordinates() {
            let (longitude, latitude) = restaurant.location.map_or_else(
                || (String::new(), String::new()),
                |coord| (coord.x.to_string(), coord.y.to_string()),
            );
            row.extend([longitude, latitude]);
        }
        row.extend([format!("{:.4}", item.score), item.explanation.clone()]);
        out.write_record(&row)
            .map_err(CliError::WriteRecommendations)?;
    }
    out.flush().map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
