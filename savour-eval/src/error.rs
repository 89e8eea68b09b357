//! Error types raised while evaluating recommenders.

use savour_core::RecommendError;
use thiserror::Error;

/// Errors raised by evaluator configuration and runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// A recommender rejected a derived query.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// A cohort split fraction lay outside `0.0..=1.0`.
    #[error("cohort split must lie within 0.0..=1.0, got {value}")]
    InvalidCohortSplit {
        /// Rejected fraction.
        value: f64,
    },
    /// A survey model could not describe a normal distribution.
    #[error("survey model needs a finite mean and a finite, non-negative spread (mean {mean}, std dev {std_dev})")]
    InvalidSurveyModel {
        /// Rejected mean.
        mean: f64,
        /// Rejected standard deviation.
        std_dev: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use savour_core::BudgetRangeError;

    #[rstest]
    fn recommend_failures_keep_their_message() {
        let cause = RecommendError::InvalidRange(BudgetRangeError::UnknownCategory {
            value: "cheap".to_owned(),
        });
        let err = EvaluationError::from(cause.clone());
        assert_eq!(err.to_string(), cause.to_string());
        assert!(err.to_string().contains("cheap"));
    }
}
