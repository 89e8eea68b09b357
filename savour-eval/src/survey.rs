//! Simulated user satisfaction surveys.
//!
//! Each surveyed session yields a Likert-style score in
//! [`LIKERT_RANGE`]. [`SimulatedSurvey`] draws scores from a normal
//! distribution using an injected random source so runs are reproducible.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use savour_core::Recommendations;

use crate::EvaluationError;

/// Bounds every satisfaction score is clamped to.
pub const LIKERT_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// Rate a set of recommendations on the Likert scale.
pub trait SatisfactionSurvey {
    /// Score the session that produced `recommendations`.
    fn rate(&mut self, recommendations: &Recommendations) -> f64;
}

/// Parameters of the simulated satisfaction distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SurveyModel {
    mean: f64,
    std_dev: f64,
}

impl SurveyModel {
    /// Validate a normal distribution with `mean` and `std_dev`.
    ///
    /// # Errors
    /// Returns [`EvaluationError::InvalidSurveyModel`] when either value is
    /// not finite or `std_dev` is negative.
    pub const fn new(mean: f64, std_dev: f64) -> Result<Self, EvaluationError> {
        if mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0 {
            Ok(Self { mean, std_dev })
        } else {
            Err(EvaluationError::InvalidSurveyModel { mean, std_dev })
        }
    }

    /// Centre of the distribution.
    #[must_use]
    pub const fn mean(self) -> f64 {
        self.mean
    }

    /// Spread of the distribution.
    #[must_use]
    pub const fn std_dev(self) -> f64 {
        self.std_dev
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "scaling a standard normal draw into the model's distribution"
    )]
    fn scale(self, standard: f64) -> f64 {
        (self.mean + self.std_dev * standard).clamp(*LIKERT_RANGE.start(), *LIKERT_RANGE.end())
    }
}

impl Default for SurveyModel {
    fn default() -> Self {
        Self {
            mean: 4.0,
            std_dev: 0.3,
        }
    }
}

/// Survey that ignores the recommendations and draws a clamped normal score.
///
/// # Examples
/// ```
/// use savour_core::Recommendations;
/// use savour_eval::{SatisfactionSurvey, SimulatedSurvey, SurveyModel};
///
/// let mut survey = SimulatedSurvey::seeded(SurveyModel::default(), 7);
/// let score = survey.rate(&Recommendations::empty(false));
/// assert!((1.0..=5.0).contains(&score));
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedSurvey<R = ChaCha8Rng> {
    model: SurveyModel,
    rng: R,
}

impl SimulatedSurvey {
    /// Survey drawing from a `ChaCha8Rng` seeded with `seed`.
    #[must_use]
    pub fn seeded(model: SurveyModel, seed: u64) -> Self {
        Self::new(model, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulatedSurvey<R> {
    /// Survey drawing from `rng`.
    #[must_use]
    pub const fn new(model: SurveyModel, rng: R) -> Self {
        Self { model, rng }
    }

    /// Distribution parameters in use.
    #[must_use]
    pub const fn model(&self) -> SurveyModel {
        self.model
    }
}

impl<R: Rng> SatisfactionSurvey for SimulatedSurvey<R> {
    fn rate(&mut self, _recommendations: &Recommendations) -> f64 {
        let standard: f64 = self.rng.sample(StandardNormal);
        self.model.scale(standard)
    }
}
