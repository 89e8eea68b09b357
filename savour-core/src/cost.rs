//! Ordered cost categories and validated budget ranges.
//!
//! Restaurants are bucketed into three price bands. Budgets are inclusive
//! intervals over the band ordering `low < medium < high`.
//!
//! # Examples
//! ```
//! use savour_core::{BudgetRange, CostCategory};
//!
//! let range = BudgetRange::parse("Medium", " high ")?;
//! assert!(range.contains(CostCategory::High));
//! assert!(!range.contains(CostCategory::Low));
//! # Ok::<(), savour_core::BudgetRangeError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Price band of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CostCategory {
    /// Inexpensive.
    Low,
    /// Mid-priced.
    Medium,
    /// Expensive.
    High,
}

impl CostCategory {
    /// Every category in rank order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Position of the category in the budget ordering.
    ///
    /// # Examples
    /// ```
    /// use savour_core::CostCategory;
    ///
    /// assert!(CostCategory::Low.rank() < CostCategory::High.rank());
    /// ```
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostCategory {
    type Err = BudgetRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(BudgetRangeError::UnknownCategory {
                value: s.to_owned(),
            }),
        }
    }
}

/// Errors raised when a budget range cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetRangeError {
    /// A bound did not name a known cost category.
    #[error("budget category '{value}' must be one of low, medium, high")]
    UnknownCategory {
        /// Bound as supplied by the caller.
        value: String,
    },
    /// The lower bound ranks above the upper bound.
    #[error("budget range lower bound '{low}' cannot exceed upper bound '{high}'")]
    Inverted {
        /// Requested lower bound.
        low: CostCategory,
        /// Requested upper bound.
        high: CostCategory,
    },
}

/// Inclusive interval over [`CostCategory`] ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRange {
    low: CostCategory,
    high: CostCategory,
}

impl BudgetRange {
    /// Build a range, rejecting bounds in the wrong order.
    ///
    /// # Errors
    /// Returns [`BudgetRangeError::Inverted`] when `low` ranks above `high`.
    pub const fn new(low: CostCategory, high: CostCategory) -> Result<Self, BudgetRangeError> {
        if low.rank() > high.rank() {
            return Err(BudgetRangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// Parse both bounds and build a range.
    ///
    /// Bounds are trimmed and matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`BudgetRangeError::UnknownCategory`] for an unrecognised
    /// bound and [`BudgetRangeError::Inverted`] for bounds out of order.
    pub fn parse(low: &str, high: &str) -> Result<Self, BudgetRangeError> {
        let lower = low.parse::<CostCategory>()?;
        let upper = high.parse::<CostCategory>()?;
        Self::new(lower, upper)
    }

    /// A range admitting exactly one category.
    #[must_use]
    pub const fn single(category: CostCategory) -> Self {
        Self {
            low: category,
            high: category,
        }
    }

    /// Lower bound.
    #[must_use]
    pub const fn low(self) -> CostCategory {
        self.low
    }

    /// Upper bound.
    #[must_use]
    pub const fn high(self) -> CostCategory {
        self.high
    }

    /// Report whether `category` lies within the range.
    #[must_use]
    pub const fn contains(self, category: CostCategory) -> bool {
        self.low.rank() <= category.rank() && category.rank() <= self.high.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("low", CostCategory::Low)]
    #[case(" Medium ", CostCategory::Medium)]
    #[case("HIGH", CostCategory::High)]
    fn parses_categories_loosely(#[case] raw: &str, #[case] expected: CostCategory) {
        assert_eq!(raw.parse::<CostCategory>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_category() {
        let err = BudgetRange::parse("cheap", "high").expect_err("unknown bound should error");
        assert_eq!(
            err,
            BudgetRangeError::UnknownCategory {
                value: "cheap".to_owned()
            }
        );
    }

    #[rstest]
    fn rejects_inverted_range() {
        let err = BudgetRange::parse("high", "low").expect_err("inverted range should error");
        assert!(matches!(err, BudgetRangeError::Inverted { .. }));
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[rstest]
    #[case(CostCategory::Low, false)]
    #[case(CostCategory::Medium, true)]
    #[case(CostCategory::High, true)]
    fn membership_is_an_interval_test(#[case] category: CostCategory, #[case] expected: bool) {
        let range =
            BudgetRange::new(CostCategory::Medium, CostCategory::High).expect("ordered range");
        assert_eq!(range.contains(category), expected);
    }

    #[rstest]
    fn single_range_admits_only_its_category() {
        let range = BudgetRange::single(CostCategory::Medium);
        let admitted: Vec<_> = CostCategory::ALL
            .into_iter()
            .filter(|category| range.contains(*category))
            .collect();
        assert_eq!(admitted, vec![CostCategory::Medium]);
    }
}
