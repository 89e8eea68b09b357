//! Core domain types and ranking for the Savour restaurant recommender.
//!
//! A [`Dataset`] holds normalised [`Restaurant`] records and the bounds
//! needed to scale ratings and vote counts. [`Recommender`] filters the
//! dataset against caller [`Preferences`], relaxes one preference at a time
//! when nothing matches, and ranks survivors with a [`Scorer`].
//!
//! # Examples
//! ```
//! use savour_core::{CostCategory, Dataset, Preferences, Query, Recommend, Recommender, Restaurant};
//!
//! let recommender = Recommender::new(Dataset::new([
//!     Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
//!     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
//! ]));
//! let query = Query::new(Preferences::new().with_cuisines(["Indian"])).with_top_n(1);
//! let results = recommender.recommend(&query)?;
//! assert_eq!(results.len(), 1);
//! # Ok::<(), savour_core::RecommendError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod dataset;
pub mod filter;
pub mod query;
pub mod recommend;
pub mod restaurant;
pub mod scorer;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{BudgetRange, BudgetRangeError, CostCategory};
pub use dataset::{
    COLUMN_CITY, COLUMN_COST, COLUMN_CUISINE, COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME,
    COLUMN_RATING, COLUMN_VOTES, Dataset, DatasetError, MetricBounds, REQUIRED_COLUMNS,
};
pub use filter::{FUZZY_CITY_CUTOFF, FUZZY_CITY_LIMIT, Selection};
pub use query::{DEFAULT_TOP_N, Preferences, Query};
pub use recommend::{
    COLUMN_EXPLANATION, COLUMN_SCORE, FallbackStage, Recommend, RecommendError,
    Recommendations, Recommender, ScoredRestaurant,
};
pub use restaurant::Restaurant;
pub use scorer::{
    NEUTRAL_SCORE, RatingVotesScorer, ScoreWeights, ScoreWeightsError, Scorer, normalise,
};
