//! One-way ANOVA across all cohorts of a dataset.
//!
//! ANOVA is the one inherently cross-cohort computation: a single
//! degenerate cohort invalidates the whole test for that metric, so
//! unlike the per-cohort analyzers its failures are metric-fatal.

use serde::{Deserialize, Serialize};

use crate::dataset::{CohortDataset, Metric};
use crate::error::{AnalysisError, AnalysisFailure};

/// One-way ANOVA result for one metric across all cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    /// The F statistic.
    pub f_statistic: f64,
    /// Upper-tail probability at the observed F.
    pub p_value: f64,
    /// Between-group degrees of freedom (k - 1).
    pub df_between: usize,
    /// Within-group degrees of freedom (N - k).
    pub df_within: usize,
}

impl AnovaResult {
    /// The plain-text summary line the reporting collaborator writes,
    /// at full numeric precision. Rounding and scientific notation are
    /// the writer's business.
    #[must_use]
    pub fn summary_line(&self, metric: Metric) -> String {
        format!(
            "One-way ANOVA for {metric} continuity scores: F = {}, p = {}",
            self.f_statistic, self.p_value
        )
    }
}

/// Runs the one-way ANOVA for one metric across every cohort.
///
/// # Errors
///
/// * [`AnalysisError::InsufficientGroups`] for fewer than two cohorts
/// * [`AnalysisError::Schema`] if a cohort's metric extraction fails
/// * [`AnalysisError::InsufficientSample`] when pooled within-group
///   degrees of freedom are exhausted (N - k < 1)
/// * [`AnalysisError::DegenerateSample`] naming the first zero-variance
///   cohort; the test is skipped rather than computed without it
pub fn across_cohorts(
    dataset: &CohortDataset,
    metric: Metric,
) -> Result<AnovaResult, AnalysisFailure> {
    let k = dataset.len();
    if k < 2 {
        return Err(AnalysisFailure::new(
            None,
            metric,
            AnalysisError::InsufficientGroups { observed: k },
        ));
    }

    let mut groups = Vec::with_capacity(k);
    for cohort in dataset {
        let values = cohort
            .metric_values(metric)
            .map_err(|error| AnalysisFailure::new(Some(cohort.label()), metric, error))?;
        groups.push((cohort.label().to_owned(), values));
    }

    let total: usize = groups.iter().map(|(_, values)| values.len()).sum();
    if total < k + 1 {
        return Err(AnalysisFailure::new(
            None,
            metric,
            AnalysisError::InsufficientSample {
                observed: total,
                required: k + 1,
            },
        ));
    }

    for (label, values) in &groups {
        if values.iter().all(|v| *v == values[0]) {
            return Err(AnalysisFailure::new(
                Some(label),
                metric,
                AnalysisError::DegenerateSample,
            ));
        }
    }

    let slices: Vec<&[f64]> = groups.iter().map(|(_, values)| values.as_slice()).collect();
    let result = mmci_stats::anova::one_way_anova(&slices).ok_or_else(|| {
        AnalysisFailure::new(None, metric, AnalysisError::DegenerateSample)
    })?;

    Ok(AnovaResult {
        f_statistic: result.f_statistic,
        p_value: result.p_value,
        df_between: result.df_between,
        df_within: result.df_within,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Cohort, Observation};

    fn cohort(label: &str, values: &[f64]) -> Cohort {
        let observations = values
            .iter()
            .map(|&value| Observation {
                age: 30,
                resident: value,
                attending: value,
            })
            .collect();
        Cohort::new(label, observations).unwrap()
    }

    fn dataset(cohorts: Vec<Cohort>) -> CohortDataset {
        CohortDataset::new(cohorts).unwrap()
    }

    #[test]
    fn test_single_cohort_rejected() {
        let data = dataset(vec![cohort("2018", &[1.0, 2.0, 3.0])]);
        let failure = across_cohorts(&data, Metric::Resident).unwrap_err();
        assert_eq!(failure.cohort, None);
        assert_eq!(failure.error, AnalysisError::InsufficientGroups { observed: 1 });
    }

    #[test]
    fn test_degenerate_cohort_is_fatal_and_named() {
        let data = dataset(vec![
            cohort("2018", &[1.0, 2.0, 3.0]),
            cohort("2019", &[4.0, 4.0, 4.0]),
        ]);
        let failure = across_cohorts(&data, Metric::Resident).unwrap_err();
        assert_eq!(failure.cohort.as_deref(), Some("2019"));
        assert_eq!(failure.error, AnalysisError::DegenerateSample);
    }

    #[test]
    fn test_exhausted_degrees_of_freedom() {
        let data = dataset(vec![cohort("2018", &[1.0]), cohort("2019", &[2.0])]);
        let failure = across_cohorts(&data, Metric::Resident).unwrap_err();
        assert_eq!(
            failure.error,
            AnalysisError::InsufficientSample {
                observed: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_three_cohorts_degrees_of_freedom() {
        let a: Vec<f64> = (0..10).map(f64::from).collect();
        let b: Vec<f64> = (0..12).map(|v| f64::from(v) + 3.0).collect();
        let c: Vec<f64> = (0..9).map(|v| f64::from(v) + 6.0).collect();
        let data = dataset(vec![
            cohort("2017", &a),
            cohort("2018", &b),
            cohort("2019", &c),
        ]);
        let result = across_cohorts(&data, Metric::Resident).unwrap();
        assert_eq!((result.df_between, result.df_within), (2, 28));
        assert!(result.f_statistic >= 0.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_summary_line_full_precision() {
        let result = AnovaResult {
            f_statistic: 1.517_532_641_2,
            p_value: 0.000_123_456_789,
            df_between: 2,
            df_within: 28,
        };
        let line = result.summary_line(Metric::Attending);
        assert!(line.contains("attending"));
        assert!(line.contains("1.5175326412"));
        assert!(line.contains("0.000123456789"));
    }
}
