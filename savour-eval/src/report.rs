//! Markdown summary of an evaluation session.

use crate::{AbTestOutcome, HitRate, MetricsAccumulator};

/// Hit-rate, A/B delta and the raw survey history of one session.
///
/// # Examples
/// ```
/// use savour_eval::{AbTestOutcome, Cohort, CohortSummary, EvaluationReport, HitRate, MetricsAccumulator};
///
/// let ab = AbTestOutcome {
///     cohort_a: CohortSummary { cohort: Cohort::A, assigned: 1, scores: vec![4.0] },
///     cohort_b: CohortSummary { cohort: Cohort::B, assigned: 1, scores: vec![4.5] },
/// };
/// let report = EvaluationReport::new(HitRate { hits: 3, total: 4 }, ab, &MetricsAccumulator::new());
/// let markdown = report.render_markdown();
/// assert!(markdown.contains("- Hit-rate: **75.00%**"));
/// assert!(markdown.contains("- A/B delta in satisfaction: **0.50** points"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvaluationReport {
    /// Outcome of the hit-rate run.
    pub hit_rate: HitRate,
    /// Outcome of the A/B run.
    pub ab_test: AbTestOutcome,
    /// Every satisfaction score recorded so far.
    pub satisfaction_scores: Vec<f64>,
    /// Every usability feedback line recorded so far.
    pub usability_feedback: Vec<String>,
}

impl EvaluationReport {
    /// Capture run outcomes and a snapshot of `metrics`.
    #[must_use]
    pub fn new(hit_rate: HitRate, ab_test: AbTestOutcome, metrics: &MetricsAccumulator) -> Self {
        Self {
            hit_rate,
            ab_test,
            satisfaction_scores: metrics.satisfaction_scores().to_vec(),
            usability_feedback: metrics
                .usability_feedback()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Render the report as Markdown.
    ///
    /// The delta reads `n/a` when a cohort surveyed nobody.
    #[expect(
        clippy::float_arithmetic,
        reason = "the hit rate is shown as a percentage"
    )]
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let delta = self
            .ab_test
            .delta()
            .map_or_else(|| String::from("n/a"), |value| format!("{value:.2}"));
        let percentage = self.hit_rate.ratio() * 100.0;
        [
            String::from("# Evaluation Report\n"),
            format!("- Hit-rate: **{percentage:.2}%**"),
            format!("- A/B delta in satisfaction: **{delta}** points"),
            String::from("\n## Raw metrics"),
            format!("- Satisfaction scores: {:?}", self.satisfaction_scores),
            format!("- Usability feedback: {:?}", self.usability_feedback),
        ]
        .into_iter()
        .map(|line| line + "\n")
        .collect()
    }
}
