//! Categorical usability feedback derived from satisfaction scores.

use std::fmt;

/// Scores strictly above this count as excellent.
pub const EXCELLENT_THRESHOLD: f64 = 4.5;

/// Scores strictly below this need improvement.
pub const NEEDS_IMPROVEMENT_THRESHOLD: f64 = 3.5;

/// Arm of an A/B test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Cohort {
    /// Served by the first recommender.
    A,
    /// Served by the second recommender.
    B,
}

impl Cohort {
    /// Single-letter label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cohort {}", self.label())
    }
}

/// Coarse reading of a satisfaction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeedbackGrade {
    /// Above [`EXCELLENT_THRESHOLD`].
    Excellent,
    /// Between the thresholds, inclusive.
    Fair,
    /// Below [`NEEDS_IMPROVEMENT_THRESHOLD`].
    NeedsImprovement,
}

impl FeedbackGrade {
    /// Grade a satisfaction score.
    ///
    /// # Examples
    /// ```
    /// use savour_eval::FeedbackGrade;
    ///
    /// assert_eq!(FeedbackGrade::from_score(4.6), FeedbackGrade::Excellent);
    /// assert_eq!(FeedbackGrade::from_score(4.5), FeedbackGrade::Fair);
    /// assert_eq!(FeedbackGrade::from_score(3.4), FeedbackGrade::NeedsImprovement);
    /// ```
    #[must_use]
    pub const fn from_score(score: f64) -> Self {
        if score > EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score < NEEDS_IMPROVEMENT_THRESHOLD {
            Self::NeedsImprovement
        } else {
            Self::Fair
        }
    }

    /// Message shown to readers of the report.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent suggestions!",
            Self::Fair => "Fair but could be better.",
            Self::NeedsImprovement => "Recommendations need improvement.",
        }
    }
}

/// Feedback recorded for one simulated session.
///
/// Displays as `"Cohort A: Excellent suggestions!"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UsabilityFeedback {
    /// Cohort the session belonged to.
    pub cohort: Cohort,
    /// Grade of the session's satisfaction score.
    pub grade: FeedbackGrade,
}

impl UsabilityFeedback {
    /// Feedback for a `cohort` session that scored `score`.
    #[must_use]
    pub const fn new(cohort: Cohort, score: f64) -> Self {
        Self {
            cohort,
            grade: FeedbackGrade::from_score(score),
        }
    }
}

impl fmt::Display for UsabilityFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.cohort, self.grade.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cohort::A, 4.8, "Cohort A: Excellent suggestions!")]
    #[case(Cohort::B, 3.0, "Cohort B: Recommendations need improvement.")]
    #[case(Cohort::A, 3.5, "Cohort A: Fair but could be better.")]
    #[case(Cohort::B, 4.0, "Cohort B: Fair but could be better.")]
    fn renders_feedback(#[case] cohort: Cohort, #[case] score: f64, #[case] expected: &str) {
        assert_eq!(UsabilityFeedback::new(cohort, score).to_string(), expected);
    }
}
