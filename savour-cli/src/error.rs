//! Error types emitted by the Savour CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use savour_core::{DatasetError, RecommendError, ScoreWeightsError};
use savour_eval::EvaluationError;
use thiserror::Error;

/// Errors emitted by the Savour CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// Only one end of the budget range was supplied.
    #[error("budget-low and budget-high must be given together")]
    IncompleteBudget,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the dataset file failed.
    #[error("failed to open dataset at {path:?}: {source}")]
    OpenDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The dataset file is not well-formed CSV.
    #[error("failed to read dataset CSV at {path:?}: {source}")]
    ReadDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// The dataset CSV parsed but its contents were rejected.
    #[error("dataset at {path:?} is invalid: {source}")]
    Dataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Schema or value failure.
        #[source]
        source: DatasetError,
    },
    /// The recommender rejected the request.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Configured score weights were unusable.
    #[error(transparent)]
    InvalidWeights(#[from] ScoreWeightsError),
    /// Evaluation failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// Writing recommendation rows failed.
    #[error("failed to write recommendations: {0}")]
    WriteRecommendations(#[source] csv::Error),
    /// Writing the evaluation report failed.
    #[error("failed to write report to {path:?}: {source}")]
    WriteReport {
        /// Report path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
