//! Property-based tests for recommendation ranking.
//!
//! # Invariants tested
//!
//! - **Bounded output:** never more than `top_n` recommendations.
//! - **Ordering:** scores are non-increasing and lie in `0.0..=1.0`.
//! - **Membership:** every recommendation comes from the dataset.
//! - **Filter soundness:** strict results honour the budget preference.

use proptest::prelude::*;
use savour_core::{
    BudgetRange, CostCategory, Dataset, FallbackStage, Preferences, Query, Recommend, Recommender,
    Restaurant,
};

const CITIES: [&str; 4] = ["delhi", "mumbai", "pune", "chennai"];
const CUISINES: [&str; 4] = ["indian", "chinese", "thai", "cafe"];

fn restaurant_strategy() -> impl Strategy<Value = Restaurant> {
    (
        prop::sample::select(CITIES.to_vec()),
        prop::sample::select(CUISINES.to_vec()),
        prop::sample::select(CostCategory::ALL.to_vec()),
        0_u32..=50,
        0_u64..5_000,
    )
        .prop_map(|(city, cuisine, cost, tenths, votes)| {
            let rating = f64::from(tenths) / 10.0;
            Restaurant::new(format!("{city}-{cuisine}"), city, cuisine, cost, rating, votes)
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(restaurant_strategy(), 1..40).prop_map(Dataset::new)
}

fn preferences_strategy() -> impl Strategy<Value = Preferences> {
    (
        prop::collection::vec(prop::sample::select(CUISINES.to_vec()), 0..3),
        prop::option::of((0_usize..3, 0_usize..3)),
        prop::option::of(prop::sample::select(CITIES.to_vec())),
    )
        .prop_map(|(cuisines, budget, location)| {
            let mut preferences = Preferences::new().with_cuisines(cuisines);
            if let Some((first, second)) = budget {
                let names = CostCategory::ALL.map(CostCategory::as_str);
                let bounds = (names.get(first.min(second)), names.get(first.max(second)));
                if let (Some(low), Some(high)) = bounds {
                    preferences = preferences.with_budget(*low, *high);
                }
            }
            if let Some(city) = location {
                preferences = preferences.with_location(city);
            }
            preferences
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: results are bounded, sorted and scored within range.
    #[test]
    fn results_are_bounded_and_sorted(
        dataset in dataset_strategy(),
        preferences in preferences_strategy(),
        top_n in 0_usize..8,
    ) {
        let recommender = Recommender::new(dataset);
        let results = recommender
            .recommend(&Query::new(preferences).with_top_n(top_n))
            .expect("valid preferences never error");

        prop_assert!(results.len() <= top_n);
        for item in results.items() {
            prop_assert!((0.0..=1.0).contains(&item.score));
        }
        for pair in results.items().windows(2) {
            if let [first, second] = pair {
                prop_assert!(first.score >= second.score);
            }
        }
    }

    /// Property: every recommendation is a dataset row.
    #[test]
    fn results_come_from_the_dataset(
        dataset in dataset_strategy(),
        preferences in preferences_strategy(),
    ) {
        let recommender = Recommender::new(dataset);
        let results = recommender
            .recommend(&Query::new(preferences))
            .expect("valid preferences never error");
        for item in results.items() {
            prop_assert!(recommender.dataset().records().contains(&item.restaurant));
        }
    }

    /// Property: strict results honour the requested budget.
    #[test]
    fn strict_results_respect_budget(
        dataset in dataset_strategy(),
        preferences in preferences_strategy(),
    ) {
        let recommender = Recommender::new(dataset);
        let results = recommender
            .recommend(&Query::new(preferences.clone()))
            .expect("valid preferences never error");
        if results.stage() == FallbackStage::Strict {
            if let Some((low, high)) = preferences.budget() {
                let range = BudgetRange::parse(low, high).expect("generated range");
                for item in results.items() {
                    prop_assert!(range.contains(item.restaurant.cost));
                }
            }
        }
    }
}
