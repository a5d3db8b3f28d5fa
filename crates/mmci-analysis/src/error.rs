//! Failure taxonomy for the analysis engine.
//!
//! Every failure is reported explicitly, tied to the cohort and metric
//! that triggered it; no statistic is ever silently coerced to a
//! default the consumer could mistake for a real value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Metric;
use crate::subgroup::AgeGroup;

/// A failure of one analysis step.
///
/// Variants carry the numeric context of the failure; the cohort and
/// metric it belongs to are attached by [`AnalysisFailure`] when the
/// failure is collected into a report.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Serialize, Deserialize,
)]
pub enum AnalysisError {
    /// Input violated the ingestion contract: a non-finite metric
    /// value, an empty cohort, or a malformed label.
    #[display("schema violation: {detail}")]
    Schema { detail: String },
    /// A statistic requires a minimum sample size that was not met.
    #[display("{observed} observation(s) where at least {required} are required")]
    InsufficientSample { observed: usize, required: usize },
    /// ANOVA requires at least two cohorts.
    #[display("at least 2 cohorts are required, found {observed}")]
    InsufficientGroups { observed: usize },
    /// A zero-variance sample makes the statistic undefined.
    #[display("sample has zero variance, the statistic is undefined")]
    DegenerateSample,
    /// An age-based split left one subgroup without observations.
    #[display("{subgroup} age subgroup is empty")]
    EmptySubgroup { subgroup: AgeGroup },
    /// The sample exceeds the calibrated range of the normality test.
    #[display("{observed} observations exceed the test's {limit}-sample calibration")]
    SampleTooLarge { observed: usize, limit: usize },
}

/// An [`AnalysisError`] located at the (cohort, metric) pair that
/// triggered it.
///
/// `cohort` is `None` for failures of inherently cross-cohort
/// computations (ANOVA group count, exhausted pooled degrees of
/// freedom).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub cohort: Option<String>,
    pub metric: Metric,
    #[error(source)]
    pub error: AnalysisError,
}

impl AnalysisFailure {
    #[must_use]
    pub fn new(cohort: Option<&str>, metric: Metric, error: AnalysisError) -> Self {
        Self {
            cohort: cohort.map(str::to_owned),
            metric,
            error,
        }
    }
}

impl fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cohort {
            Some(cohort) => write!(f, "cohort '{cohort}', {} metric: {}", self.metric, self.error),
            None => write!(f, "{} metric: {}", self.metric, self.error),
        }
    }
}
