//! Behavioural coverage for preference filtering, fallback and ranking.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use savour_core::{
    BudgetRangeError, CostCategory, Dataset, FallbackStage, Preferences, Query, Recommend,
    RecommendError, Recommendations, Recommender, Restaurant,
};

type Outcome = RefCell<Option<Result<Recommendations, RecommendError>>>;

/// Recommender under test, populated by a `Given` step.
#[fixture]
pub fn recommender() -> RefCell<Option<Recommender>> {
    RefCell::new(None)
}

/// Result of the most recent recommendation request.
#[fixture]
pub fn outcome() -> Outcome {
    RefCell::new(None)
}

fn ask(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome, preferences: Preferences) {
    let guard = recommender.borrow();
    let active = guard
        .as_ref()
        .unwrap_or_else(|| panic!("recommender must be initialised"));
    *outcome.borrow_mut() = Some(active.recommend(&Query::new(preferences)));
}

fn recommendations(outcome: &Outcome) -> Recommendations {
    match outcome.borrow().as_ref() {
        Some(Ok(results)) => results.clone(),
        Some(Err(err)) => panic!("recommendation failed: {err}"),
        None => panic!("no recommendation was requested"),
    }
}

#[given("a dataset with two Delhi cafes")]
fn two_delhi_cafes(recommender: &RefCell<Option<Recommender>>) {
    let dataset = Dataset::new([
        Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100),
        Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
    ]);
    *recommender.borrow_mut() = Some(Recommender::new(dataset));
}

#[when("I ask for Indian food in delhi on a low to medium budget")]
fn ask_indian_in_delhi(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome) {
    let preferences = Preferences::new()
        .with_cuisines(["Indian"])
        .with_budget("low", "medium")
        .with_location("delhi");
    ask(recommender, outcome, preferences);
}

#[when("I ask for Thai food in delhi")]
fn ask_thai_in_delhi(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome) {
    let preferences = Preferences::new()
        .with_cuisines(["Thai"])
        .with_location("delhi");
    ask(recommender, outcome, preferences);
}

#[when("I ask for restaurants in dehli")]
fn ask_misspelt_city(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome) {
    ask(recommender, outcome, Preferences::new().with_location("dehli"));
}

#[when("I ask for a high to low budget")]
fn ask_inverted_budget(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome) {
    ask(recommender, outcome, Preferences::new().with_budget("high", "low"));
}

#[when("I ask for Thai food in pune on a high budget")]
fn ask_impossible(recommender: &RefCell<Option<Recommender>>, outcome: &Outcome) {
    let preferences = Preferences::new()
        .with_cuisines(["Thai"])
        .with_budget("high", "high")
        .with_location("pune");
    ask(recommender, outcome, preferences);
}

#[then("{count} restaurants are recommended")]
fn recommended_count(count: usize, outcome: &Outcome) {
    assert_eq!(recommendations(outcome).len(), count);
}

#[then("Cafe A is recommended first")]
fn cafe_a_first(outcome: &Outcome) {
    let results = recommendations(outcome);
    let first = results
        .items()
        .first()
        .unwrap_or_else(|| panic!("expected at least one recommendation"));
    assert_eq!(first.restaurant.name, "Cafe A");
}

#[then("the strict filter was used")]
fn strict_stage(outcome: &Outcome) {
    assert_eq!(recommendations(outcome).stage(), FallbackStage::Strict);
}

#[then("the cuisine preference was dropped")]
fn cuisine_dropped(outcome: &Outcome) {
    assert_eq!(recommendations(outcome).stage(), FallbackStage::WithoutCuisine);
}

#[then("the request fails with an invalid range")]
fn invalid_range(outcome: &Outcome) {
    let borrowed = outcome.borrow();
    assert!(matches!(
        borrowed.as_ref(),
        Some(Err(RecommendError::InvalidRange(BudgetRangeError::Inverted { .. })))
    ));
}

#[scenario(path = "tests/features/recommend.feature", index = 0)]
fn strict_preferences(recommender: RefCell<Option<Recommender>>, outcome: Outcome) {
    let _ = (recommender, outcome);
}

#[scenario(path = "tests/features/recommend.feature", index = 1)]
fn cuisine_fallback(recommender: RefCell<Option<Recommender>>, outcome: Outcome) {
    let _ = (recommender, outcome);
}

#[scenario(path = "tests/features/recommend.feature", index = 2)]
fn fuzzy_city(recommender: RefCell<Option<Recommender>>, outcome: Outcome) {
    let _ = (recommender, outcome);
}

#[scenario(path = "tests/features/recommend.feature", index = 3)]
fn inverted_budget(recommender: RefCell<Option<Recommender>>, outcome: Outcome) {
    let _ = (recommender, outcome);
}

#[scenario(path = "tests/features/recommend.feature", index = 4)]
fn nothing_matches(recommender: RefCell<Option<Recommender>>, outcome: Outcome) {
    let _ = (recommender, outcome);
}
