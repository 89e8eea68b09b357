//! Offline evaluation of recommenders.
//!
//! Both runs derive their queries from dataset rows: the row's own cuisine,
//! cost category (as a single-category budget) and city. Sampling and cohort
//! shuffling use `ChaCha8Rng` streams seeded from [`EvaluationConfig`], so
//! repeated runs over the same dataset are identical.

use rand::SeedableRng;
use rand::seq::{SliceRandom, index};
use rand_chacha::ChaCha8Rng;
use savour_core::{Dataset, Preferences, Query, Recommend, Restaurant};

use crate::{
    Cohort, EvaluationError, MetricsAccumulator, SatisfactionSurvey, SimulatedSurvey,
    SurveyModel, UsabilityFeedback,
};

/// Default seed for hit-rate sampling.
pub const DEFAULT_HIT_RATE_SEED: u64 = 42;
/// Default seed for the A/B cohort shuffle.
pub const DEFAULT_COHORT_SEED: u64 = 0;
/// Default seed for the simulated survey.
pub const DEFAULT_SURVEY_SEED: u64 = 1;
/// Default number of results requested per evaluation query.
pub const DEFAULT_EVALUATION_TOP_N: usize = 5;
/// Default maximum number of rows surveyed per cohort.
pub const DEFAULT_COHORT_LIMIT: usize = 50;

/// Seeds and sizes controlling an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvaluationConfig {
    /// Seed for choosing hit-rate sample rows.
    pub hit_rate_seed: u64,
    /// Seed for shuffling rows before the cohort split.
    pub cohort_seed: u64,
    /// Seed for the default simulated survey.
    pub survey_seed: u64,
    /// Results requested per hit-rate query.
    pub hit_rate_top_n: usize,
    /// Results requested per A/B query.
    pub ab_top_n: usize,
    /// Rows surveyed per cohort at most.
    pub cohort_limit: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            hit_rate_seed: DEFAULT_HIT_RATE_SEED,
            cohort_seed: DEFAULT_COHORT_SEED,
            survey_seed: DEFAULT_SURVEY_SEED,
            hit_rate_top_n: DEFAULT_EVALUATION_TOP_N,
            ab_top_n: DEFAULT_EVALUATION_TOP_N,
            cohort_limit: DEFAULT_COHORT_LIMIT,
        }
    }
}

/// Fraction of shuffled rows assigned to cohort A.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CohortSplit(f64);

impl CohortSplit {
    /// Validate a split fraction.
    ///
    /// # Errors
    /// Returns [`EvaluationError::InvalidCohortSplit`] when `fraction` is not
    /// within `0.0..=1.0`.
    pub fn new(fraction: f64) -> Result<Self, EvaluationError> {
        if (0.0..=1.0).contains(&fraction) {
            Ok(Self(fraction))
        } else {
            Err(EvaluationError::InvalidCohortSplit { value: fraction })
        }
    }

    /// The fraction.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        self.0
    }

    /// Rows of a `len`-row dataset assigned to cohort A, rounded down.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the split point is the floor of a fraction of the row count"
    )]
    #[must_use]
    pub fn cohort_a_len(self, len: usize) -> usize {
        ((self.0 * len as f64).floor() as usize).min(len)
    }
}

impl Default for CohortSplit {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Outcome of a hit-rate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HitRate {
    /// Sampled rows whose query returned a same-city, same-cuisine match.
    pub hits: usize,
    /// Sampled rows queried.
    pub total: usize,
}

impl HitRate {
    /// `hits / total`, or `0.0` when nothing was sampled.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "hit rate is a ratio of counts"
    )]
    #[must_use]
    pub fn ratio(self) -> f64 {
        self.hits as f64 / self.total.max(1) as f64
    }
}

/// Satisfaction summary for one A/B cohort.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CohortSummary {
    /// Which arm this is.
    pub cohort: Cohort,
    /// Rows assigned to the cohort by the split.
    pub assigned: usize,
    /// Scores of the surveyed sessions, in survey order.
    pub scores: Vec<f64>,
}

impl CohortSummary {
    /// Mean satisfaction, or `None` when no session was surveyed.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "a mean divides a sum by a count"
    )]
    #[must_use]
    pub fn mean_satisfaction(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
    }
}

/// Outcome of an A/B run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AbTestOutcome {
    /// Cohort served by the first recommender.
    pub cohort_a: CohortSummary,
    /// Cohort served by the second recommender.
    pub cohort_b: CohortSummary,
}

impl AbTestOutcome {
    /// Cohort B's mean satisfaction minus cohort A's.
    ///
    /// `None` when either cohort surveyed nobody.
    #[expect(
        clippy::float_arithmetic,
        reason = "the delta subtracts two means"
    )]
    #[must_use]
    pub fn delta(&self) -> Option<f64> {
        self.cohort_a
            .mean_satisfaction()
            .zip(self.cohort_b.mean_satisfaction())
            .map(|(a, b)| b - a)
    }
}

/// Runs hit-rate and A/B evaluations against any [`Recommend`] implementor.
///
/// # Examples
/// ```
/// use savour_core::{CostCategory, Dataset, Recommender, Restaurant};
/// use savour_eval::{EvaluationConfig, Evaluator, MetricsAccumulator};
///
/// let dataset = Dataset::new([
///     Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
///     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
/// ]);
/// let recommender = Recommender::new(dataset.clone());
/// let evaluator = Evaluator::new(EvaluationConfig::default());
/// let mut metrics = MetricsAccumulator::new();
///
/// let hit_rate = evaluator.evaluate_hit_rate(&dataset, &recommender, 2, &mut metrics)?;
/// assert_eq!(hit_rate.ratio(), 1.0);
/// # Ok::<(), savour_eval::EvaluationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator<S = SimulatedSurvey> {
    config: EvaluationConfig,
    survey: S,
}

impl Evaluator {
    /// Evaluator using a simulated survey seeded from `config`.
    #[must_use]
    pub fn new(config: EvaluationConfig) -> Self {
        let survey = SimulatedSurvey::seeded(SurveyModel::default(), config.survey_seed);
        Self { config, survey }
    }
}

impl<S: SatisfactionSurvey> Evaluator<S> {
    /// Evaluator using a caller-supplied survey.
    #[must_use]
    pub const fn with_survey(config: EvaluationConfig, survey: S) -> Self {
        Self { config, survey }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> EvaluationConfig {
        self.config
    }

    /// Measure how often a row's own attributes lead back to a matching row.
    ///
    /// Samples `sample_size` distinct rows without replacement; a sample
    /// larger than the dataset is clamped to the dataset size. A row counts
    /// as a hit when any recommendation shares both its city and cuisine.
    /// The accumulator's hit counters are reset first.
    ///
    /// # Errors
    /// Propagates [`EvaluationError::Recommend`] from the recommender.
    pub fn evaluate_hit_rate<R>(
        &self,
        dataset: &Dataset,
        recommender: &R,
        sample_size: usize,
        metrics: &mut MetricsAccumulator,
    ) -> Result<HitRate, EvaluationError>
    where
        R: Recommend + ?Sized,
    {
        metrics.reset_hits();
        let amount = sample_size.min(dataset.len());
        if amount < sample_size {
            log::warn!(
                "hit-rate sample of {sample_size} exceeds dataset of {} rows; clamping",
                dataset.len()
            );
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.hit_rate_seed);
        for row in index::sample(&mut rng, dataset.len(), amount).into_iter() {
            let Some(original) = dataset.get(row) else {
                continue;
            };
            let query = echo_query(original, self.config.hit_rate_top_n);
            let results = recommender.recommend(&query)?;
            let hit = results.items().iter().any(|item| {
                item.restaurant.city == original.city && item.restaurant.cuisine == original.cuisine
            });
            metrics.record_query(hit);
        }

        let outcome = HitRate {
            hits: metrics.hits(),
            total: metrics.total(),
        };
        log::info!("hit-rate {}/{}", outcome.hits, outcome.total);
        Ok(outcome)
    }

    /// Survey two recommenders over disjoint cohorts of dataset rows.
    ///
    /// Rows are shuffled, the first `split` fraction forms cohort A and the
    /// remainder cohort B. Up to `cohort_limit` rows per cohort are queried
    /// and each session is scored by the survey. Scores and feedback are
    /// appended to `metrics`, cohort A first.
    ///
    /// # Errors
    /// Propagates [`EvaluationError::Recommend`] from either recommender.
    pub fn run_ab_test<A, B>(
        &mut self,
        dataset: &Dataset,
        recommender_a: &A,
        recommender_b: &B,
        split: CohortSplit,
        metrics: &mut MetricsAccumulator,
    ) -> Result<AbTestOutcome, EvaluationError>
    where
        A: Recommend + ?Sized,
        B: Recommend + ?Sized,
    {
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(self.config.cohort_seed));
        let (rows_a, rows_b) = order.split_at(split.cohort_a_len(order.len()));

        let cohort_a = self.survey_cohort(Cohort::A, dataset, recommender_a, rows_a, metrics)?;
        let cohort_b = self.survey_cohort(Cohort::B, dataset, recommender_b, rows_b, metrics)?;
        let outcome = AbTestOutcome { cohort_a, cohort_b };
        match outcome.delta() {
            Some(delta) => log::info!("A/B satisfaction delta {delta:.3}"),
            None => log::warn!("A/B test surveyed an empty cohort; no delta"),
        }
        Ok(outcome)
    }

    fn survey_cohort<R>(
        &mut self,
        cohort: Cohort,
        dataset: &Dataset,
        recommender: &R,
        rows: &[usize],
        metrics: &mut MetricsAccumulator,
    ) -> Result<CohortSummary, EvaluationError>
    where
        R: Recommend + ?Sized,
    {
        let mut scores = Vec::new();
        for original in rows
            .iter()
            .take(self.config.cohort_limit)
            .filter_map(|&row| dataset.get(row))
        {
            let results = recommender.recommend(&echo_query(original, self.config.ab_top_n))?;
            let score = self.survey.rate(&results);
            metrics.record_session(score, UsabilityFeedback::new(cohort, score));
            scores.push(score);
        }
        log::debug!("{cohort} surveyed {} of {} rows", scores.len(), rows.len());
        Ok(CohortSummary {
            cohort,
            assigned: rows.len(),
            scores,
        })
    }
}

/// Query asking for the row's own cuisine, cost category and city.
fn echo_query(row: &Restaurant, top_n: usize) -> Query {
    let cost = row.cost.as_str();
    let preferences = Preferences::new()
        .with_cuisines([row.cuisine.as_str()])
        .with_budget(cost, cost)
        .with_location(row.city.as_str());
    Query::new(preferences).with_top_n(top_n)
}
