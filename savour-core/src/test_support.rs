//! Fixtures shared by unit, behaviour and downstream crate tests.

use crate::{
    CostCategory, Dataset, FallbackStage, Query, Recommend, RecommendError, Recommendations,
    Restaurant, Scorer, ScoredRestaurant,
};

/// Twelve restaurants across four cities with mixed cuisines and budgets.
#[must_use]
pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new("Spice Route", "New Delhi", "North Indian", CostCategory::Low, 4.1, 300),
        Restaurant::new("Dragon Bowl", "New Delhi", "Chinese", CostCategory::Medium, 3.8, 120),
        Restaurant::new("Royal Tandoor", "New Delhi", "North Indian", CostCategory::High, 4.6, 1200),
        Restaurant::new("Bombay Bites", "Mumbai", "Indian", CostCategory::High, 4.5, 900),
        Restaurant::new("Coastal Curry", "Mumbai", "Seafood", CostCategory::Medium, 4.0, 450),
        Restaurant::new("Chowpatty Chaat", "Mumbai", "Street Food", CostCategory::Low, 3.9, 800),
        Restaurant::new("Pune Thali", "Pune", "Gujarati", CostCategory::Medium, 3.2, 40),
        Restaurant::new("Koregaon Cafe", "Pune", "Cafe", CostCategory::Low, 4.2, 210),
        Restaurant::new("Deccan Wok", "Pune", "Chinese", CostCategory::Low, 3.5, 60),
        Restaurant::new("Lake View", "Bengaluru", "South Indian", CostCategory::Medium, 4.4, 700),
        Restaurant::new("Brew Garden", "Bengaluru", "Cafe", CostCategory::High, 4.0, 350),
        Restaurant::new("Dosa Corner", "Bengaluru", "South Indian", CostCategory::Low, 4.3, 1500),
    ]
}

/// [`sample_restaurants`] loaded into a [`Dataset`].
#[must_use]
pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_restaurants())
}

/// Scorer returning the same value for every restaurant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantScorer(pub f64);

impl Scorer for ConstantScorer {
    fn score(&self, _restaurant: &Restaurant) -> f64 {
        self.0
    }
}

/// Recommender that ignores the query and returns the same restaurants.
///
/// Results are truncated to the query's `top_n` and scored `1.0`.
#[derive(Debug, Clone, Default)]
pub struct FixedRecommender {
    restaurants: Vec<Restaurant>,
}

impl FixedRecommender {
    /// Recommender always suggesting `restaurants` in order.
    #[must_use]
    pub fn new(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        Self {
            restaurants: restaurants.into_iter().collect(),
        }
    }
}

impl Recommend for FixedRecommender {
    fn recommend(&self, query: &Query) -> Result<Recommendations, RecommendError> {
        let items: Vec<ScoredRestaurant> = self
            .restaurants
            .iter()
            .take(query.top_n())
            .map(|restaurant| ScoredRestaurant {
                restaurant: restaurant.clone(),
                score: 1.0,
                explanation: String::from("fixed"),
            })
            .collect();
        Ok(Recommendations::from_parts(items, FallbackStage::Strict, false))
    }
}
