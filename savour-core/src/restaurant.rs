//! The restaurant record shared by every stage of the pipeline.

use geo::Coord;

use crate::CostCategory;

/// One row of the restaurant dataset.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Once a
/// record belongs to a [`Dataset`](crate::Dataset) its `city` and `cuisine`
/// fields are lowercase and trimmed.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use savour_core::{CostCategory, Restaurant};
///
/// let cafe = Restaurant::new("Cafe A", "Delhi", "Indian", CostCategory::Low, 4.2, 100)
///     .with_location(Coord { x: 77.2, y: 28.6 });
///
/// assert_eq!(cafe.votes, 100);
/// assert!(cafe.location.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Restaurant {
    /// Display name.
    pub name: String,
    /// City the restaurant trades in.
    pub city: String,
    /// Primary cuisine.
    pub cuisine: String,
    /// Price band.
    pub cost: CostCategory,
    /// Aggregate rating.
    pub rating: f64,
    /// Number of ratings behind `rating`.
    pub votes: u64,
    /// Optional geographic position.
    pub location: Option<Coord<f64>>,
}

impl Restaurant {
    /// Construct a restaurant without coordinates.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        cuisine: impl Into<String>,
        cost: CostCategory,
        rating: f64,
        votes: u64,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            cuisine: cuisine.into(),
            cost,
            rating,
            votes,
            location: None,
        }
    }

    /// Attach coordinates while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    pub(crate) fn normalised(mut self) -> Self {
        self.city = normalise_text(&self.city);
        self.cuisine = normalise_text(&self.cuisine);
        self
    }
}

/// Lowercase and trim free text for matching.
pub(crate) fn normalise_text(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalising_touches_only_match_fields() {
        let cafe = Restaurant::new(" Cafe A ", "  New Delhi ", "North INDIAN", CostCategory::Low, 4.0, 1)
            .normalised();
        assert_eq!(cafe.name, " Cafe A ");
        assert_eq!(cafe.city, "new delhi");
        assert_eq!(cafe.cuisine, "north indian");
    }
}
