//! Facade crate for the Savour restaurant recommender.
//!
//! This crate re-exports the core recommendation types and exposes the
//! offline evaluator behind the `eval` feature.
//!
//! ```
//! use savour::{CostCategory, Dataset, Preferences, Query, Recommend, Recommender, Restaurant};
//!
//! let recommender = Recommender::new(Dataset::new([
//!     Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
//! ]));
//! let query = Query::new(Preferences::new().with_location("delhi"));
//! assert_eq!(recommender.recommend(&query)?.len(), 1);
//! # Ok::<(), savour::RecommendError>(())
//! ```

#![forbid(unsafe_code)]

pub use savour_core::{
    BudgetRange, BudgetRangeError, CostCategory, Dataset, DatasetError, FallbackStage,
    Preferences, Query, RatingVotesScorer, Recommend, RecommendError, Recommendations,
    Recommender, Restaurant, ScoreWeights, ScoreWeightsError, ScoredRestaurant, Scorer,
};

#[cfg(feature = "eval")]
pub use savour_eval as eval;
