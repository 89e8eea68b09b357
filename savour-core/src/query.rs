//! Caller preferences and recommendation queries.
//!
//! Every preference is optional; an absent preference matches every
//! restaurant. Budget bounds are kept as supplied and validated when the
//! filter runs, so an invalid range surfaces as a
//! [`BudgetRangeError`](crate::BudgetRangeError) from the recommend call.

use crate::restaurant::normalise_text;
use crate::{BudgetRange, BudgetRangeError};

/// Result count used when a query does not specify one.
pub const DEFAULT_TOP_N: usize = 5;

/// Cuisine, budget and location preferences.
///
/// # Examples
/// ```
/// use savour_core::Preferences;
///
/// let preferences = Preferences::new()
///     .with_cuisines(["Indian", "  ", "Chinese"])
///     .with_budget("low", "medium")
///     .with_location("New Delhi");
///
/// assert_eq!(preferences.cuisines(), ["Indian", "Chinese"]);
/// assert_eq!(preferences.budget(), Some(("low", "medium")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    cuisines: Vec<String>,
    budget: Option<(String, String)>,
    location: Option<String>,
}

impl Preferences {
    /// Preferences that match every restaurant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request any of `cuisines`. Blank entries are dropped.
    #[must_use]
    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = cuisines
            .into_iter()
            .map(Into::into)
            .map(|cuisine| cuisine.trim().to_owned())
            .filter(|cuisine| !cuisine.is_empty())
            .collect();
        self
    }

    /// Request cost categories between `low` and `high` inclusive.
    #[must_use]
    pub fn with_budget(mut self, low: impl Into<String>, high: impl Into<String>) -> Self {
        self.budget = Some((low.into(), high.into()));
        self
    }

    /// Request restaurants in or near `location`. A blank location is ignored.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let value = location.into();
        self.location = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    /// Requested cuisines as supplied (trimmed).
    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Requested budget bounds as supplied.
    #[must_use]
    pub fn budget(&self) -> Option<(&str, &str)> {
        self.budget
            .as_ref()
            .map(|(low, high)| (low.as_str(), high.as_str()))
    }

    /// Requested location as supplied.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub(crate) fn budget_range(&self) -> Result<Option<BudgetRange>, BudgetRangeError> {
        self.budget()
            .map(|(low, high)| BudgetRange::parse(low, high))
            .transpose()
    }

    pub(crate) fn normalised_cuisines(&self) -> Vec<String> {
        self.cuisines.iter().map(|c| normalise_text(c)).collect()
    }

    pub(crate) fn normalised_location(&self) -> Option<String> {
        self.location.as_deref().map(normalise_text)
    }

    pub(crate) fn without_cuisines(&self) -> Self {
        Self {
            cuisines: Vec::new(),
            ..self.clone()
        }
    }

    pub(crate) fn without_budget(&self) -> Self {
        Self {
            budget: None,
            ..self.clone()
        }
    }

    pub(crate) fn without_location(&self) -> Self {
        Self {
            location: None,
            ..self.clone()
        }
    }
}

/// Preferences plus the number of results wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    preferences: Preferences,
    top_n: usize,
}

impl Query {
    /// Query for the top [`DEFAULT_TOP_N`] matches of `preferences`.
    #[must_use]
    pub const fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Override the result count.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Preferences driving the query.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Maximum number of results.
    #[must_use]
    pub const fn top_n(&self) -> usize {
        self.top_n
    }
}
