//! Score restaurants for ranking.
//!
//! The `Scorer` trait assigns a quality score to a
//! [`Restaurant`](crate::Restaurant). The default implementation,
//! [`RatingVotesScorer`], blends the restaurant's rating and vote count after
//! min-max scaling both against dataset-wide bounds.

use thiserror::Error;

use crate::dataset::votes_as_f64;
use crate::{Dataset, MetricBounds, Restaurant};

/// Normalised value substituted when a metric has no variance.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Spans narrower than this are treated as zero variance.
const VARIANCE_EPSILON: f64 = 1e-6;

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Calculate a ranking score for a restaurant.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and infallible.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Return non-negative values.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use savour_core::{CostCategory, Restaurant, Scorer};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _restaurant: &Restaurant) -> f64 {
///         1.0
///     }
/// }
///
/// let cafe = Restaurant::new("Cafe", "Delhi", "Indian", CostCategory::Low, 4.0, 10);
/// assert_eq!(UnitScorer.score(&cafe), 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `restaurant`.
    fn score(&self, restaurant: &Restaurant) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

/// Scale `value` into `0.0..=1.0` against `bounds`.
///
/// Returns [`NEUTRAL_SCORE`] when the bounds have no variance.
///
/// # Examples
/// ```
/// use savour_core::{MetricBounds, NEUTRAL_SCORE, normalise};
///
/// assert_eq!(normalise(4.0, MetricBounds::new(3.0, 5.0)), 0.5);
/// assert_eq!(normalise(4.0, MetricBounds::new(4.0, 4.0)), NEUTRAL_SCORE);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "min-max scaling divides by the observed span"
)]
#[must_use]
pub fn normalise(value: f64, bounds: MetricBounds) -> f64 {
    let span = bounds.max() - bounds.min();
    if span < VARIANCE_EPSILON {
        return NEUTRAL_SCORE;
    }
    (value - bounds.min()) / span
}

/// Relative weighting between rating and popularity.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Multiplier applied to the normalised rating.
    pub rating: f64,
    /// Multiplier applied to the normalised vote count.
    pub votes: f64,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when either value is not finite, is
    /// negative, or the pair does not sum to one.
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ScoreWeightsError { weights: self })
        }
    }

    fn is_valid(self) -> bool {
        self.has_finite_values() && self.has_non_negative_values() && self.sums_to_one()
    }

    const fn has_finite_values(self) -> bool {
        self.rating.is_finite() && self.votes.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.rating >= 0.0 && self.votes >= 0.0
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums weights to check they form a convex blend"
    )]
    fn sums_to_one(self) -> bool {
        ((self.rating + self.votes) - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "score blending requires a weighted sum"
    )]
    fn blend(self, rating: f64, votes: f64) -> f64 {
        self.rating * rating + self.votes * votes
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: 0.7,
            votes: 0.3,
        }
    }
}

/// Provided weights were unusable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "weights must be finite, non-negative and sum to 1 (rating {}, votes {})",
    .weights.rating,
    .weights.votes
)]
pub struct ScoreWeightsError {
    /// The rejected weights.
    pub weights: ScoreWeights,
}

/// Blend of normalised rating and normalised vote count.
///
/// # Examples
/// ```
/// use savour_core::{CostCategory, Dataset, RatingVotesScorer, Restaurant, Scorer};
///
/// let dataset = Dataset::new([
///     Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
///     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
/// ]);
/// let scorer = RatingVotesScorer::new(&dataset);
/// let score = scorer.score(&dataset.records()[0]);
/// assert!((score - 0.7).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingVotesScorer {
    rating_bounds: MetricBounds,
    vote_bounds: MetricBounds,
    weights: ScoreWeights,
}

impl RatingVotesScorer {
    /// Scorer over `dataset`'s bounds with the default weights.
    #[must_use]
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            rating_bounds: dataset.rating_bounds(),
            vote_bounds: dataset.vote_bounds(),
            weights: ScoreWeights::default(),
        }
    }

    /// Scorer over `dataset`'s bounds with custom weights.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when the weights fail validation.
    pub fn with_weights(
        dataset: &Dataset,
        weights: ScoreWeights,
    ) -> Result<Self, ScoreWeightsError> {
        Ok(Self {
            weights: weights.validate()?,
            ..Self::new(dataset)
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Rating scaled against the dataset bounds.
    #[must_use]
    pub fn normalised_rating(&self, restaurant: &Restaurant) -> f64 {
        normalise(restaurant.rating, self.rating_bounds)
    }

    /// Vote count scaled against the dataset bounds.
    #[must_use]
    pub fn normalised_votes(&self, restaurant: &Restaurant) -> f64 {
        normalise(votes_as_f64(restaurant.votes), self.vote_bounds)
    }
}

impl Scorer for RatingVotesScorer {
    fn score(&self, restaurant: &Restaurant) -> f64 {
        let blended = self.weights.blend(
            self.normalised_rating(restaurant),
            self.normalised_votes(restaurant),
        );
        Self::sanitise(blended)
    }
}
