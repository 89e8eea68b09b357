//! Running evaluation metrics.
//!
//! The accumulator is owned by the caller and passed to each evaluator run.
//! Hit counters restart with every hit-rate run; satisfaction scores and
//! usability feedback keep growing until [`MetricsAccumulator::reset`].

use crate::UsabilityFeedback;

/// Hit and session tallies collected across evaluator runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsAccumulator {
    hits: usize,
    total: usize,
    satisfaction_scores: Vec<f64>,
    usability_feedback: Vec<UsabilityFeedback>,
}

impl MetricsAccumulator {
    /// An empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampled rows whose query found a matching restaurant.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Sampled rows queried in the latest hit-rate run.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Every simulated satisfaction score, in recording order.
    #[must_use]
    pub fn satisfaction_scores(&self) -> &[f64] {
        &self.satisfaction_scores
    }

    /// Every usability feedback entry, in recording order.
    #[must_use]
    pub fn usability_feedback(&self) -> &[UsabilityFeedback] {
        &self.usability_feedback
    }

    /// Clear the hit counters, keeping survey history.
    pub const fn reset_hits(&mut self) {
        self.hits = 0;
        self.total = 0;
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        self.reset_hits();
        self.satisfaction_scores.clear();
        self.usability_feedback.clear();
    }

    pub(crate) const fn record_query(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
    }

    pub(crate) fn record_session(&mut self, score: f64, feedback: UsabilityFeedback) {
        self.satisfaction_scores.push(score);
        self.usability_feedback.push(feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cohort;
    use rstest::{fixture, rstest};

    #[fixture]
    fn populated() -> MetricsAccumulator {
        let mut metrics = MetricsAccumulator::new();
        metrics.record_query(true);
        metrics.record_query(false);
        metrics.record_session(4.2, UsabilityFeedback::new(Cohort::A, 4.2));
        metrics
    }

    #[rstest]
    fn counts_queries_and_sessions(populated: MetricsAccumulator) {
        assert_eq!((populated.hits(), populated.total()), (1, 2));
        assert_eq!(populated.satisfaction_scores(), [4.2]);
        assert_eq!(populated.usability_feedback().len(), 1);
    }

    #[rstest]
    fn reset_hits_keeps_history(mut populated: MetricsAccumulator) {
        populated.reset_hits();
        assert_eq!((populated.hits(), populated.total()), (0, 0));
        assert_eq!(populated.satisfaction_scores().len(), 1);
    }

    #[rstest]
    fn reset_clears_everything(mut populated: MetricsAccumulator) {
        populated.reset();
        assert_eq!(populated, MetricsAccumulator::new());
    }
}
