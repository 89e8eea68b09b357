//! In-memory restaurant dataset with precomputed normalisation bounds.
//!
//! A [`Dataset`] owns every [`Restaurant`] for the lifetime of a
//! recommender. Construction lowercases and trims the city and cuisine
//! fields and records the minimum and maximum rating and vote count. The
//! dataset is never mutated afterwards, so the bounds stay valid.
//!
//! Tabular input (for example a CSV file) enters through
//! [`Dataset::from_table`], which locates the required columns by header
//! name and fails fast when any are absent.

use geo::Coord;
use thiserror::Error;

use crate::{CostCategory, Restaurant};

/// Header of the restaurant name column.
pub const COLUMN_NAME: &str = "Restaurant Name";
/// Header of the city column.
pub const COLUMN_CITY: &str = "City";
/// Header of the primary cuisine column.
pub const COLUMN_CUISINE: &str = "Primary Cuisine";
/// Header of the cost category column.
pub const COLUMN_COST: &str = "Cost Category";
/// Header of the rating column.
pub const COLUMN_RATING: &str = "Rating";
/// Header of the vote count column.
pub const COLUMN_VOTES: &str = "Votes";
/// Header of the optional longitude column.
pub const COLUMN_LONGITUDE: &str = "Longitude";
/// Header of the optional latitude column.
pub const COLUMN_LATITUDE: &str = "Latitude";

/// Columns every dataset must provide, in output order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_NAME,
    COLUMN_CITY,
    COLUMN_CUISINE,
    COLUMN_COST,
    COLUMN_RATING,
    COLUMN_VOTES,
];

/// Ratings outside this interval are rejected when parsing tables.
const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

/// Errors raised while building a dataset from tabular input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// One or more required columns are absent from the header.
    #[error("dataset is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// Every absent required column.
        columns: Vec<&'static str>,
    },
    /// A cell could not be parsed into its column's type.
    #[error("row {row} has an invalid {column} value '{value}'")]
    InvalidValue {
        /// One-based data row number, excluding the header.
        row: usize,
        /// Header of the offending column.
        column: &'static str,
        /// Cell contents as read.
        value: String,
    },
}

/// Minimum and maximum of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    min: f64,
    max: f64,
}

impl MetricBounds {
    /// Bounds of an explicit interval.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest observed value.
    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    /// Largest observed value.
    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    /// Fold the bounds of `values`, ignoring NaN. Empty input yields `0..=0`.
    fn observe(values: impl IntoIterator<Item = f64>) -> Self {
        let folded = values
            .into_iter()
            .filter(|value| !value.is_nan())
            .fold(None, |acc: Option<Self>, value| {
                Some(acc.map_or(Self::new(value, value), |bounds| {
                    Self::new(bounds.min.min(value), bounds.max.max(value))
                }))
            });
        folded.unwrap_or(Self::new(0.0, 0.0))
    }
}

/// Immutable collection of normalised restaurants.
///
/// # Examples
/// ```
/// use savour_core::{CostCategory, Dataset, Restaurant};
///
/// let dataset = Dataset::new([
///     Restaurant::new("Cafe A", " Delhi ", "Indian", CostCategory::Low, 4.2, 100),
///     Restaurant::new("Cafe B", "Delhi", "Chinese", CostCategory::Medium, 4.0, 500),
/// ]);
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.rating_bounds().max(), 4.2);
/// assert_eq!(dataset.get(0).map(|r| r.city.as_str()), Some("delhi"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Restaurant>,
    rating_bounds: MetricBounds,
    vote_bounds: MetricBounds,
}

impl Dataset {
    /// Normalise `records` and capture their bounds.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = Restaurant>) -> Self {
        let normalised: Vec<Restaurant> = records.into_iter().map(Restaurant::normalised).collect();
        let rating_bounds = MetricBounds::observe(normalised.iter().map(|r| r.rating));
        let vote_bounds = MetricBounds::observe(normalised.iter().map(|r| votes_as_f64(r.votes)));
        log::debug!("loaded dataset with {} restaurants", normalised.len());
        Self {
            records: normalised,
            rating_bounds,
            vote_bounds,
        }
    }

    /// Build a dataset from a header row and string cells.
    ///
    /// Columns are matched by trimmed header name in any order and extra
    /// columns are ignored. `Longitude` and `Latitude` are optional; a row
    /// gains coordinates only when both cells are non-blank.
    ///
    /// # Errors
    /// Returns [`DatasetError::MissingColumns`] when a required header is
    /// absent and [`DatasetError::InvalidValue`] when a cost category,
    /// rating, vote count or coordinate cannot be parsed.
    ///
    /// # Examples
    /// ```
    /// use savour_core::{Dataset, DatasetError};
    ///
    /// let headers = ["Restaurant Name", "City", "Primary Cuisine", "Cost Category", "Rating", "Votes"];
    /// let rows = [["Cafe A", "Delhi", "Indian", "low", "4.2", "100"]];
    /// let dataset = Dataset::from_table(headers, rows)?;
    /// assert_eq!(dataset.len(), 1);
    ///
    /// let err = Dataset::from_table(["City"], Vec::<Vec<&str>>::new()).unwrap_err();
    /// assert!(matches!(err, DatasetError::MissingColumns { .. }));
    /// # Ok::<(), DatasetError>(())
    /// ```
    pub fn from_table<H, R, C>(
        headers: impl IntoIterator<Item = H>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, DatasetError>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let columns = ColumnIndex::resolve(headers)?;
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(offset, row)| {
                let cells: Vec<C> = row.into_iter().collect();
                columns.parse_row(offset + 1, &cells)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }

    /// All restaurants in load order.
    #[must_use]
    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    /// Restaurant at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Restaurant> {
        self.records.get(index)
    }

    /// Number of restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the dataset holds no restaurants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dataset-wide rating bounds.
    #[must_use]
    pub const fn rating_bounds(&self) -> MetricBounds {
        self.rating_bounds
    }

    /// Dataset-wide vote count bounds.
    #[must_use]
    pub const fn vote_bounds(&self) -> MetricBounds {
        self.vote_bounds
    }

    /// Report whether any restaurant carries coordinates.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.records.iter().any(|r| r.location.is_some())
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "vote counts stay far below 2^52 in practice"
)]
pub(crate) const fn votes_as_f64(votes: u64) -> f64 {
    votes as f64
}

/// Positions of the known columns within a header row.
struct ColumnIndex {
    name: usize,
    city: usize,
    cuisine: usize,
    cost: usize,
    rating: usize,
    votes: usize,
    coordinates: Option<(usize, usize)>,
}

impl ColumnIndex {
    fn resolve<H: AsRef<str>>(headers: impl IntoIterator<Item = H>) -> Result<Self, DatasetError> {
        let names: Vec<String> = headers
            .into_iter()
            .map(|header| header.as_ref().trim().to_owned())
            .collect();
        let position = |column: &str| names.iter().position(|name| name == column);

        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|column| position(column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns { columns: missing });
        }

        let require = |column: &'static str| {
            position(column).ok_or_else(|| DatasetError::MissingColumns {
                columns: vec![column],
            })
        };
        Ok(Self {
            name: require(COLUMN_NAME)?,
            city: require(COLUMN_CITY)?,
            cuisine: require(COLUMN_CUISINE)?,
            cost: require(COLUMN_COST)?,
            rating: require(COLUMN_RATING)?,
            votes: require(COLUMN_VOTES)?,
            coordinates: position(COLUMN_LONGITUDE).zip(position(COLUMN_LATITUDE)),
        })
    }

    fn parse_row<C: AsRef<str>>(
        &self,
        row: usize,
        cells: &[C],
    ) -> Result<Restaurant, DatasetError> {
        let cell = |index: usize| cells.get(index).map_or("", |value| value.as_ref());
        let invalid = |column: &'static str, index: usize| DatasetError::InvalidValue {
            row,
            column,
            value: cell(index).to_owned(),
        };

        let cost = cell(self.cost)
            .parse::<CostCategory>()
            .map_err(|_| invalid(COLUMN_COST, self.cost))?;
        let rating = cell(self.rating)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| RATING_RANGE.contains(value))
            .ok_or_else(|| invalid(COLUMN_RATING, self.rating))?;
        let votes = cell(self.votes)
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(COLUMN_VOTES, self.votes))?;

        let restaurant = Restaurant::new(
            cell(self.name),
            cell(self.city),
            cell(self.cuisine),
            cost,
            rating,
            votes,
        );
        match self.coordinates {
            Some((longitude, latitude)) => {
                let x = parse_coordinate(cell(longitude))
                    .map_err(|()| invalid(COLUMN_LONGITUDE, longitude))?;
                let y = parse_coordinate(cell(latitude))
                    .map_err(|()| invalid(COLUMN_LATITUDE, latitude))?;
                Ok(match x.zip(y) {
                    Some((lon, lat)) => restaurant.with_location(Coord { x: lon, y: lat }),
                    None => restaurant,
                })
            }
            None => Ok(restaurant),
        }
    }
}

/// Blank cells are absent coordinates; anything else must be a finite float.
fn parse_coordinate(raw: &str) -> Result<Option<f64>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn headers() -> Vec<&'static str> {
        vec![
            "Restaurant Name",
            "City",
            "Primary Cuisine",
            "Cost Category",
            "Rating",
            "Votes",
            "Longitude",
            "Latitude",
        ]
    }

    #[rstest]
    fn normalises_match_fields_and_bounds() {
        let dataset = Dataset::new([
            Restaurant::new("A", " Delhi", "INDIAN ", CostCategory::Low, 3.5, 10),
            Restaurant::new("B", "Pune", "Thai", CostCategory::High, 4.5, 90),
        ]);
        let first = dataset.get(0).expect("first row");
        assert_eq!(first.city, "delhi");
        assert_eq!(first.cuisine, "indian");
        assert_eq!(dataset.rating_bounds(), MetricBounds::new(3.5, 4.5));
        assert_eq!(dataset.vote_bounds(), MetricBounds::new(10.0, 90.0));
    }

    #[rstest]
    fn empty_dataset_has_zero_bounds() {
        let dataset = Dataset::new(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.rating_bounds(), MetricBounds::new(0.0, 0.0));
    }

    #[rstest]
    fn reports_every_missing_column() {
        let headers = ["Restaurant Name", "City", "Rating"];
        let err = Dataset::from_table(headers, Vec::<Vec<&str>>::new())
            .expect_err("missing columns should error");
        assert_eq!(
            err,
            DatasetError::MissingColumns {
                columns: vec![COLUMN_CUISINE, COLUMN_COST, COLUMN_VOTES],
            }
        );
        assert!(err.to_string().contains("Primary Cuisine, Cost Category, Votes"));
    }

    #[rstest]
    fn reads_columns_in_any_order(headers: Vec<&'static str>) {
        let mut shuffled = headers;
        shuffled.reverse();
        let rows = [["28.6", "77.2", "120", "4.1", "Medium", "North Indian", "New Delhi", "Spice Route"]];
        let dataset = Dataset::from_table(shuffled, rows).expect("valid table");
        let record = dataset.get(0).expect("one record");
        assert_eq!(record.name, "Spice Route");
        assert_eq!(record.cost, CostCategory::Medium);
        assert_eq!(record.votes, 120);
        assert_eq!(record.location, Some(Coord { x: 77.2, y: 28.6 }));
        assert!(dataset.has_coordinates());
    }

    #[rstest]
    fn blank_coordinates_are_absent(headers: Vec<&'static str>) {
        let rows = [["Cafe", "Delhi", "Indian", "low", "4.0", "5", "", "28.6"]];
        let dataset = Dataset::from_table(headers, rows).expect("valid table");
        assert!(!dataset.has_coordinates());
    }

    #[rstest]
    #[case(["Cafe", "Delhi", "Indian", "cheap", "4.0", "5", "", ""], COLUMN_COST)]
    #[case(["Cafe", "Delhi", "Indian", "low", "five", "5", "", ""], COLUMN_RATING)]
    #[case(["Cafe", "Delhi", "Indian", "low", "7.5", "5", "", ""], COLUMN_RATING)]
    #[case(["Cafe", "Delhi", "Indian", "low", "4.0", "-5", "", ""], COLUMN_VOTES)]
    #[case(["Cafe", "Delhi", "Indian", "low", "4.0", "5", "east", "1"], COLUMN_LONGITUDE)]
    fn rejects_unparseable_cells(
        headers: Vec<&'static str>,
        #[case] row: [&str; 8],
        #[case] column: &'static str,
    ) {
        let err = Dataset::from_table(headers, [row]).expect_err("invalid cell should error");
        match err {
            DatasetError::InvalidValue {
                row: number,
                column: reported,
                ..
            } => {
                assert_eq!(number, 1);
                assert_eq!(reported, column);
            }
            DatasetError::MissingColumns { .. } => panic!("unexpected schema error"),
        }
    }
}
