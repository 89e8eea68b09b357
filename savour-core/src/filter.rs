//! Narrow a dataset to the restaurants matching caller preferences.
//!
//! Three independent predicates are applied in turn:
//!
//! - **Cuisine** keeps rows whose cuisine contains any requested cuisine as
//!   a whole word.
//! - **Budget** keeps rows whose cost category lies inside the requested
//!   inclusive range.
//! - **Location** tries an exact city match, then up to
//!   [`FUZZY_CITY_LIMIT`] cities whose normalised Levenshtein similarity to
//!   the request is at least [`FUZZY_CITY_CUTOFF`], then a substring match,
//!   keeping the first tier that yields rows.
//!
//! The location tiers only consider cities that survived the cuisine and
//! budget predicates.

use std::collections::HashSet;

use crate::{BudgetRangeError, Dataset, Preferences, Restaurant};

/// Minimum similarity for a city to count as a fuzzy match.
pub const FUZZY_CITY_CUTOFF: f64 = 0.5;

/// Maximum number of cities a fuzzy match may select.
pub const FUZZY_CITY_LIMIT: usize = 3;

/// Restaurants selected by [`Dataset::filter`], in dataset order.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> Selection<'a> {
    /// Positions of the selected rows within the dataset.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Report whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the selected restaurants in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Restaurant> + '_ {
        self.indices
            .iter()
            .filter_map(|&index| self.dataset.get(index))
    }
}

impl Dataset {
    /// Select the restaurants matching every preference.
    ///
    /// An empty selection is a normal outcome, not an error.
    ///
    /// # Errors
    /// Returns [`BudgetRangeError`] when the budget bounds are unknown or
    /// out of order.
    ///
    /// # Examples
    /// ```
    /// use savour_core::{CostCategory, Dataset, Preferences, Restaurant};
    ///
    /// let dataset = Dataset::new([
    ///     Restaurant::new("Cafe A", "Delhi", "North Indian", CostCategory::Low, 4.2, 100),
    ///     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
    ///     Restaurant::new("Cafe C", "Mumbai", "Indian", CostCategory::High, 3.9, 50),
    /// ]);
    ///
    /// let preferences = Preferences::new().with_cuisines(["indian"]).with_location("delhi");
    /// let selection = dataset.filter(&preferences)?;
    /// let names: Vec<_> = selection.iter().map(|r| r.name.as_str()).collect();
    /// assert_eq!(names, ["Cafe A"]);
    /// # Ok::<(), savour_core::BudgetRangeError>(())
    /// ```
    pub fn filter(&self, preferences: &Preferences) -> Result<Selection<'_>, BudgetRangeError> {
        let budget = preferences.budget_range()?;
        let cuisines = preferences.normalised_cuisines();

        let candidates: Vec<usize> = self
            .records()
            .iter()
            .enumerate()
            .filter(|(_, restaurant)| matches_any_cuisine(&restaurant.cuisine, &cuisines))
            .filter(|(_, restaurant)| budget.is_none_or(|range| range.contains(restaurant.cost)))
            .map(|(index, _)| index)
            .collect();

        let indices = match preferences.normalised_location() {
            Some(location) => self.filter_location(candidates, &location),
            None => candidates,
        };
        Ok(Selection {
            dataset: self,
            indices,
        })
    }

    fn filter_location(&self, candidates: Vec<usize>, location: &str) -> Vec<usize> {
        let exact: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&index| self.city_at(index) == Some(location))
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let close = closest_cities(location, self.distinct_cities(&candidates));
        if !close.is_empty() {
            log::debug!("no exact city match for '{location}'; using fuzzy matches {close:?}");
            return candidates
                .into_iter()
                .filter(|&index| self.city_at(index).is_some_and(|city| close.contains(&city)))
                .collect();
        }

        candidates
            .into_iter()
            .filter(|&index| self.city_at(index).is_some_and(|city| city.contains(location)))
            .collect()
    }

    fn city_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(|restaurant| restaurant.city.as_str())
    }

    /// Cities of `indices` in first-seen order.
    fn distinct_cities(&self, indices: &[usize]) -> Vec<&str> {
        let mut seen = HashSet::new();
        indices
            .iter()
            .filter_map(|&index| self.city_at(index))
            .filter(|city| seen.insert(*city))
            .collect()
    }
}

fn matches_any_cuisine(cuisine: &str, requested: &[String]) -> bool {
    requested.is_empty()
        || requested
            .iter()
            .any(|wanted| contains_word(cuisine, wanted))
}

/// Report whether `needle` occurs in `haystack` bounded by non-word
/// characters or the ends of the string.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    // Overlapping occurrences are all candidates.
    haystack.char_indices().any(|(start, _)| {
        let Some(rest) = haystack.get(start..) else {
            return false;
        };
        if !rest.starts_with(needle) {
            return false;
        }
        let before = haystack
            .get(..start)
            .and_then(|prefix| prefix.chars().next_back());
        let after = rest
            .get(needle.len()..)
            .and_then(|suffix| suffix.chars().next());
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Up to [`FUZZY_CITY_LIMIT`] cities at least [`FUZZY_CITY_CUTOFF`] similar
/// to `query`, best first. Equal similarities keep their input order.
pub(crate) fn closest_cities<'c>(query: &str, cities: Vec<&'c str>) -> Vec<&'c str> {
    let mut scored: Vec<(f64, &str)> = cities
        .into_iter()
        .map(|city| (strsim::normalized_levenshtein(query, city), city))
        .filter(|(similarity, _)| *similarity >= FUZZY_CITY_CUTOFF)
        .collect();
    scored.sort_by(|left, right| right.0.total_cmp(&left.0));
    scored
        .into_iter()
        .take(FUZZY_CITY_LIMIT)
        .map(|(_, city)| city)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CostCategory;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dataset() -> Dataset {
        Dataset::new([
            Restaurant::new("Spice Route", "New Delhi", "North Indian", CostCategory::Low, 4.1, 300),
            Restaurant::new("Dragon Bowl", "New Delhi", "Chinese", CostCategory::Medium, 3.8, 120),
            Restaurant::new("Bombay Bites", "Mumbai", "Indian", CostCategory::High, 4.5, 900),
            Restaurant::new("Pune Thali", "Pune", "Indianfusion", CostCategory::Medium, 3.2, 40),
            Restaurant::new("Noida Wok", "Noida", "Chinese", CostCategory::Low, 3.5, 60),
        ])
    }

    fn names(selection: &Selection<'_>) -> Vec<String> {
        selection.iter().map(|r| r.name.clone()).collect()
    }

    #[rstest]
    #[case("north indian", "indian", true)]
    #[case("indianfusion", "indian", false)]
    #[case("south-indian", "indian", true)]
    #[case("indian", "north indian", false)]
    #[case("chinese", "", false)]
    #[case("xab ab ab", "ab ab", true)]
    #[case("pan-asian asian", "asian", true)]
    #[case("asianfusion", "asian", false)]
    fn whole_word_matching(#[case] haystack: &str, #[case] needle: &str, #[case] expected: bool) {
        assert_eq!(contains_word(haystack, needle), expected);
    }

    #[rstest]
    fn no_preferences_keep_everything(dataset: Dataset) {
        let selection = dataset.filter(&Preferences::new()).expect("valid preferences");
        assert_eq!(selection.indices(), [0, 1, 2, 3, 4]);
    }

    #[rstest]
    fn cuisine_filter_uses_word_boundaries(dataset: Dataset) {
        let preferences = Preferences::new().with_cuisines(["INDIAN"]);
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert_eq!(names(&selection), ["Spice Route", "Bombay Bites"]);
    }

    #[rstest]
    fn budget_filter_is_inclusive(dataset: Dataset) {
        let preferences = Preferences::new().with_budget("medium", "high");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert!(selection.iter().all(|r| r.cost != CostCategory::Low));
        assert_eq!(selection.len(), 3);
    }

    #[rstest]
    fn invalid_budget_is_an_error(dataset: Dataset) {
        let preferences = Preferences::new().with_budget("medium", "luxury");
        assert!(dataset.filter(&preferences).is_err());
    }

    #[rstest]
    fn exact_city_wins(dataset: Dataset) {
        let preferences = Preferences::new().with_location(" new DELHI ");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert_eq!(names(&selection), ["Spice Route", "Dragon Bowl"]);
    }

    #[rstest]
    fn misspelt_city_matches_fuzzily(dataset: Dataset) {
        let preferences = Preferences::new().with_location("Mumbay");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert_eq!(names(&selection), ["Bombay Bites"]);
    }

    #[rstest]
    fn substring_is_the_last_resort(dataset: Dataset) {
        // Too short to be similar to "new delhi", but contained in it.
        let preferences = Preferences::new().with_location("new");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert_eq!(names(&selection), ["Spice Route", "Dragon Bowl"]);
    }

    #[rstest]
    fn unknown_location_selects_nothing(dataset: Dataset) {
        let preferences = Preferences::new().with_location("Reykjavik");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert!(selection.is_empty());
    }

    #[rstest]
    fn location_tiers_see_only_surviving_cities(dataset: Dataset) {
        let preferences = Preferences::new()
            .with_cuisines(["chinese"])
            .with_location("Mumbai");
        let selection = dataset.filter(&preferences).expect("valid preferences");
        assert!(selection.is_empty());
    }

    #[rstest]
    fn fuzzy_matching_caps_and_orders_cities() {
        let cities = vec!["pune", "puna", "pone", "pun", "delhi"];
        assert_eq!(closest_cities("pune", cities), ["pune", "puna", "pone"]);
    }

    #[rstest]
    fn fuzzy_cutoff_is_inclusive() {
        // "ab" -> "ax" is one edit over two characters: similarity 0.5.
        assert_eq!(closest_cities("ab", vec!["ax", "xy"]), ["ax"]);
    }
}
