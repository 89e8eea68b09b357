//! Evaluate command implementation for the Savour CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use savour_core::{Recommender, ScoreWeights};
use savour_eval::{
    CohortSplit, EvaluationConfig, EvaluationReport, Evaluator, HitRate, MetricsAccumulator,
};
use serde::{Deserialize, Serialize};

use crate::recommend::weights_from;
use crate::{
    ARG_ALT_RATING_WEIGHT, ARG_COHORT_SEED, ARG_COHORT_SPLIT, ARG_DATASET, ARG_HIT_RATE_SEED,
    ARG_RATING_WEIGHT, ARG_REPORT, ARG_SAMPLE_SIZE, ARG_SURVEY_SEED, ARG_TOP_N, CliError,
    ENV_EVALUATE_DATASET, dataset, files,
};

/// Report path used when none is configured.
pub(crate) const DEFAULT_REPORT_PATH: &str = "evaluation_report.md";
/// Rows sampled for the hit rate when no size is configured.
pub(crate) const DEFAULT_SAMPLE_SIZE: usize = 200;
/// Recommendations requested per A/B session when no count is configured.
pub(crate) const DEFAULT_AB_TOP_N: usize = 3;

/// CLI arguments for the `evaluate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Sample dataset rows to measure how often a row's own cuisine, \
                 cost category and city lead back to a matching restaurant, \
                 then simulate an A/B satisfaction survey between two score \
                 weightings and write a Markdown report.",
    about = "Evaluate recommendation quality"
)]
#[ortho_config(prefix = "SAVOUR")]
pub(crate) struct EvaluateArgs {
    /// Path to the restaurant CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Where to write the Markdown report.
    #[arg(long = ARG_REPORT, value_name = "path")]
    #[serde(default)]
    pub(crate) report: Option<Utf8PathBuf>,
    /// Rows sampled for the hit rate.
    #[arg(long = ARG_SAMPLE_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) sample_size: Option<usize>,
    /// Recommendations requested per A/B session.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    /// Fraction of shuffled rows assigned to cohort A.
    #[arg(long = ARG_COHORT_SPLIT, value_name = "fraction")]
    #[serde(default)]
    pub(crate) cohort_split: Option<f64>,
    /// Rating weight for the hit rate and cohort A.
    #[arg(long = ARG_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
    /// Rating weight for cohort B; defaults to cohort A's.
    #[arg(long = ARG_ALT_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) alt_rating_weight: Option<f64>,
    /// Seed for the hit-rate sample.
    #[arg(long = ARG_HIT_RATE_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) hit_rate_seed: Option<u64>,
    /// Seed for the cohort shuffle.
    #[arg(long = ARG_COHORT_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) cohort_seed: Option<u64>,
    /// Seed for the simulated survey.
    #[arg(long = ARG_SURVEY_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) survey_seed: Option<u64>,
}

impl EvaluateArgs {
    pub(crate) fn into_config(self) -> Result<EvaluateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EvaluateConfig::try_from(merged)
    }
}

/// Resolved `evaluate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EvaluateConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) report: Utf8PathBuf,
    pub(crate) sample_size: usize,
    pub(crate) split: CohortSplit,
    pub(crate) weights_a: ScoreWeights,
    pub(crate) weights_b: ScoreWeights,
    pub(crate) evaluation: EvaluationConfig,
}

impl TryFrom<EvaluateArgs> for EvaluateConfig {
    type Error = CliError;

    fn try_from(args: EvaluateArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_EVALUATE_DATASET,
        })?;
        let split = args
            .cohort_split
            .map_or_else(|| Ok(CohortSplit::default()), CohortSplit::new)?;
        let weights_a = weights_from(args.rating_weight)?;
        let weights_b = match args.alt_rating_weight {
            Some(weight) => weights_from(Some(weight))?,
            None => weights_a,
        };

        let defaults = EvaluationConfig::default();
        let evaluation = EvaluationConfig {
            hit_rate_seed: args.hit_rate_seed.unwrap_or(defaults.hit_rate_seed),
            cohort_seed: args.cohort_seed.unwrap_or(defaults.cohort_seed),
            survey_seed: args.survey_seed.unwrap_or(defaults.survey_seed),
            ab_top_n: args.top_n.unwrap_or(DEFAULT_AB_TOP_N),
            ..defaults
        };

        Ok(Self {
            dataset,
            report: args
                .report
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_REPORT_PATH)),
            sample_size: args.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            split,
            weights_a,
            weights_b,
            evaluation,
        })
    }
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_evaluate_with(args, &mut stdout)
}

pub(crate) fn run_evaluate_with(
    args: EvaluateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_evaluate(&config)?;
    files::write_utf8_file(&config.report, &report.render_markdown()).map_err(|source| {
        CliError::WriteReport {
            path: config.report.clone(),
            source,
        }
    })?;
    log::info!("evaluation report written to {}", config.report);
    writeln!(writer, "{}", summary_line(&report, &config))
        .map_err(CliError::WriteOutput)
}

fn execute_evaluate(config: &EvaluateConfig) -> Result<EvaluationReport, CliError> {
    let dataset = dataset::load_dataset(&config.dataset)?;
    let recommender_a = Recommender::with_weights(dataset.clone(), config.weights_a)?;
    let recommender_b = Recommender::with_weights(dataset, config.weights_b)?;
    let rows = recommender_a.dataset();

    let mut evaluator = Evaluator::new(config.evaluation);
    let mut metrics = MetricsAccumulator::new();
    let hit_rate =
        evaluator.evaluate_hit_rate(rows, &recommender_a, config.sample_size, &mut metrics)?;
    let ab_test = evaluator.run_ab_test(
        rows,
        &recommender_a,
        &recommender_b,
        config.split,
        &mut metrics,
    )?;
    Ok(EvaluationReport::new(hit_rate, ab_test, &metrics))
}

#[expect(
    clippy::float_arithmetic,
    reason = "the hit rate is shown as a percentage"
)]
fn summary_line(report: &EvaluationReport, config: &EvaluateConfig) -> String {
    let HitRate { hits, total } = report.hit_rate;
    let delta = report
        .ab_test
        .delta()
        .map_or_else(|| String::from("n/a"), |value| format!("{value:.2}"));
    format!(
        "hit-rate {:.2}% ({hits}/{total}); satisfaction delta {delta}; report written to {}",
        report.hit_rate.ratio() * 100.0,
        config.report
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EvaluateConfig, CliError> {
    let merged = EvaluateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EvaluateConfig::try_from(merged)
}
