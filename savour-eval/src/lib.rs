//! Offline evaluation for Savour recommenders.
//!
//! The [`Evaluator`] treats any [`Recommend`](savour_core::Recommend)
//! implementor as a black box and offers two measurements:
//!
//! - **Hit rate** queries a seeded sample of dataset rows with their own
//!   cuisine, cost category and city, counting rows whose recommendations
//!   include a same-city, same-cuisine restaurant.
//! - **A/B simulation** shuffles the dataset into two cohorts, queries each
//!   cohort's recommender, and scores every session with a
//!   [`SatisfactionSurvey`], grading it into [`UsabilityFeedback`].
//!
//! Results accumulate in a caller-owned [`MetricsAccumulator`] and can be
//! summarised with [`EvaluationReport::render_markdown`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod evaluator;
mod feedback;
mod metrics;
mod report;
mod survey;

pub use error::EvaluationError;
pub use evaluator::{
    AbTestOutcome, CohortSplit, CohortSummary, DEFAULT_COHORT_LIMIT, DEFAULT_COHORT_SEED,
    DEFAULT_EVALUATION_TOP_N, DEFAULT_HIT_RATE_SEED, DEFAULT_SURVEY_SEED, EvaluationConfig,
    Evaluator, HitRate,
};
pub use feedback::{
    Cohort, EXCELLENT_THRESHOLD, FeedbackGrade, NEEDS_IMPROVEMENT_THRESHOLD, UsabilityFeedback,
};
pub use metrics::MetricsAccumulator;
pub use report::EvaluationReport;
pub use survey::{LIKERT_RANGE, SatisfactionSurvey, SimulatedSurvey, SurveyModel};
