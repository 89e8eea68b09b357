//! Rank restaurants for a query, relaxing preferences when nothing matches.
//!
//! The strict filter runs first. When it selects nothing, the recommender
//! retries with exactly one preference dropped, in the fixed order cuisine,
//! budget, location, and keeps the first non-empty selection. Survivors are
//! scored, sorted by descending score (ties keep dataset order), truncated to
//! the requested count, and annotated with an explanation built from the
//! caller's original preferences.

use thiserror::Error;

use crate::dataset::{COLUMN_LATITUDE, COLUMN_LONGITUDE, REQUIRED_COLUMNS};
use crate::{
    BudgetRangeError, Dataset, Preferences, Query, RatingVotesScorer, Restaurant, ScoreWeights,
    ScoreWeightsError, Scorer, Selection,
};

/// Header of the score output column.
pub const COLUMN_SCORE: &str = "Score";
/// Header of the explanation output column.
pub const COLUMN_EXPLANATION: &str = "Explanation";

/// Relaxations tried, in order, after the strict filter comes up empty.
const FALLBACKS: [(FallbackStage, fn(&Preferences) -> Preferences); 3] = [
    (FallbackStage::WithoutCuisine, Preferences::without_cuisines),
    (FallbackStage::WithoutBudget, Preferences::without_budget),
    (FallbackStage::WithoutLocation, Preferences::without_location),
];

/// Which filter produced a set of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackStage {
    /// Every preference was honoured.
    Strict,
    /// The cuisine preference was dropped.
    WithoutCuisine,
    /// The budget preference was dropped.
    WithoutBudget,
    /// The location preference was dropped.
    WithoutLocation,
    /// No relaxation matched anything.
    Exhausted,
}

/// Errors returned by [`Recommend::recommend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The query's budget bounds were invalid.
    #[error(transparent)]
    InvalidRange(#[from] BudgetRangeError),
}

/// A recommended restaurant with its score and explanation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredRestaurant {
    /// The restaurant as held by the dataset.
    pub restaurant: Restaurant,
    /// Ranking score in `0.0..=1.0`.
    pub score: f64,
    /// Human-readable summary of the matched preferences.
    pub explanation: String,
}

/// Ranked output of a recommendation query.
///
/// An empty list is a valid outcome; [`Recommendations::stage`] is then
/// [`FallbackStage::Exhausted`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendations {
    items: Vec<ScoredRestaurant>,
    stage: FallbackStage,
    #[cfg_attr(feature = "serde", serde(skip))]
    include_coordinates: bool,
}

impl Recommendations {
    /// An empty result for a dataset with or without coordinates.
    #[must_use]
    pub const fn empty(include_coordinates: bool) -> Self {
        Self {
            items: Vec::new(),
            stage: FallbackStage::Exhausted,
            include_coordinates,
        }
    }

    pub(crate) const fn from_parts(
        items: Vec<ScoredRestaurant>,
        stage: FallbackStage,
        include_coordinates: bool,
    ) -> Self {
        Self {
            items,
            stage,
            include_coordinates,
        }
    }

    /// Ranked restaurants, best first.
    #[must_use]
    pub fn items(&self) -> &[ScoredRestaurant] {
        &self.items
    }

    /// Consume the wrapper and return the ranked restaurants.
    #[must_use]
    pub fn into_items(self) -> Vec<ScoredRestaurant> {
        self.items
    }

    /// Filter stage that produced the results.
    #[must_use]
    pub const fn stage(&self) -> FallbackStage {
        self.stage
    }

    /// Number of recommendations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether nothing was recommended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Report whether the output schema carries coordinate columns.
    #[must_use]
    pub const fn includes_coordinates(&self) -> bool {
        self.include_coordinates
    }

    /// Output column headers, including coordinates when the dataset has them.
    ///
    /// # Examples
    /// ```
    /// use savour_core::Recommendations;
    ///
    /// let empty = Recommendations::empty(false);
    /// assert_eq!(empty.columns().last(), Some(&"Explanation"));
    /// assert_eq!(empty.columns().len(), 8);
    /// ```
    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = REQUIRED_COLUMNS.to_vec();
        if self.include_coordinates {
            columns.extend([COLUMN_LONGITUDE, COLUMN_LATITUDE]);
        }
        columns.extend([COLUMN_SCORE, COLUMN_EXPLANATION]);
        columns
    }
}

/// Produce ranked recommendations for a query.
///
/// Implementations must be `Send + Sync` so evaluators can hold them behind
/// shared references.
pub trait Recommend: Send + Sync {
    /// Recommend at most `query.top_n()` restaurants.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidRange`] when the budget bounds are
    /// invalid. Finding nothing is not an error.
    fn recommend(&self, query: &Query) -> Result<Recommendations, RecommendError>;
}

/// Recommender over an owned dataset.
///
/// # Examples
/// ```
/// use savour_core::{
///     CostCategory, Dataset, FallbackStage, Preferences, Query, Recommend, Recommender,
///     Restaurant,
/// };
///
/// let dataset = Dataset::new([
///     Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
///     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
/// ]);
/// let recommender = Recommender::new(dataset);
///
/// let preferences = Preferences::new().with_cuisines(["Thai"]).with_location("delhi");
/// let results = recommender.recommend(&Query::new(preferences))?;
/// assert_eq!(results.stage(), FallbackStage::WithoutCuisine);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results.items()[0].explanation, "1 cuisines matched | near:delhi | rating:4.2★");
/// # Ok::<(), savour_core::RecommendError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<S = RatingVotesScorer> {
    dataset: Dataset,
    scorer: S,
}

impl Recommender {
    /// Recommender scoring with the default rating/votes blend.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let scorer = RatingVotesScorer::new(&dataset);
        Self { dataset, scorer }
    }

    /// Recommender scoring with custom rating/votes weights.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when the weights fail validation.
    pub fn with_weights(
        dataset: Dataset,
        weights: ScoreWeights,
    ) -> Result<Self, ScoreWeightsError> {
        let scorer = RatingVotesScorer::with_weights(&dataset, weights)?;
        Ok(Self { dataset, scorer })
    }
}

impl<S: Scorer> Recommender<S> {
    /// Recommender using an arbitrary scorer.
    #[must_use]
    pub const fn with_scorer(dataset: Dataset, scorer: S) -> Self {
        Self { dataset, scorer }
    }

    /// Dataset the recommender ranks.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Scorer used for ranking.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    fn select(
        &self,
        preferences: &Preferences,
    ) -> Result<(Selection<'_>, FallbackStage), BudgetRangeError> {
        let strict = self.dataset.filter(preferences)?;
        if !strict.is_empty() {
            return Ok((strict, FallbackStage::Strict));
        }
        for (stage, relax) in FALLBACKS {
            let relaxed = self.dataset.filter(&relax(preferences))?;
            if !relaxed.is_empty() {
                log::debug!(
                    "strict filter matched nothing; {stage:?} matched {} rows",
                    relaxed.len()
                );
                return Ok((relaxed, stage));
            }
        }
        log::debug!("no filter relaxation matched any restaurant");
        Ok((strict, FallbackStage::Exhausted))
    }

    fn rank(&self, selection: &Selection<'_>, query: &Query) -> Vec<ScoredRestaurant> {
        let mut scored: Vec<(f64, &Restaurant)> = selection
            .iter()
            .map(|restaurant| (S::sanitise(self.scorer.score(restaurant)), restaurant))
            .collect();
        // `sort_by` is stable, so equal scores keep dataset order.
        scored.sort_by(|left, right| right.0.total_cmp(&left.0));
        scored.truncate(query.top_n());
        scored
            .into_iter()
            .map(|(score, restaurant)| ScoredRestaurant {
                restaurant: restaurant.clone(),
                score,
                explanation: explain(query.preferences(), restaurant),
            })
            .collect()
    }
}

impl<S: Scorer> Recommend for Recommender<S> {
    fn recommend(&self, query: &Query) -> Result<Recommendations, RecommendError> {
        let (selection, stage) = self.select(query.preferences())?;
        let include_coordinates = self.dataset.has_coordinates();
        if stage == FallbackStage::Exhausted {
            return Ok(Recommendations::empty(include_coordinates));
        }
        Ok(Recommendations::from_parts(
            self.rank(&selection, query),
            stage,
            include_coordinates,
        ))
    }
}

/// Summarise the caller's preferences and the restaurant's rating.
///
/// The cuisine count covers the non-blank cuisines the caller supplied;
/// [`Preferences::with_cuisines`] drops blank entries before they get here.
fn explain(preferences: &Preferences, restaurant: &Restaurant) -> String {
    let mut parts = Vec::with_capacity(4);
    if !preferences.cuisines().is_empty() {
        parts.push(format!("{} cuisines matched", preferences.cuisines().len()));
    }
    if let Some((low, high)) = preferences.budget() {
        parts.push(format!("budget:{low}-{high}"));
    }
    if let Some(location) = preferences.location() {
        parts.push(format!("near:{location}"));
    }
    parts.push(format!("rating:{:.1}★", restaurant.rating));
    parts.join(" | ")
}
