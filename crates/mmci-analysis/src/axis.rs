//! Shared histogram axis bound across cohorts.
//!
//! Comparative distribution plots are only fair if every cohort's
//! histogram shares one count axis. Each cohort's histogram is computed
//! independently, the maximum bin count is folded out of the set, and a
//! fixed visual margin is added on top. The value is a pure function of
//! the dataset and metric and must be recomputed if either changes.

use mmci_stats::histogram::Histogram;

use crate::dataset::{CohortDataset, Metric};
use crate::error::{AnalysisError, AnalysisFailure};

/// Fixed headroom added above the tallest bin.
pub const AXIS_MARGIN: u64 = 5;

/// One cohort's histogram, labeled for the renderer.
#[derive(Debug, Clone)]
pub struct CohortHistogram {
    pub label: String,
    pub histogram: Histogram,
}

/// Computes every cohort's Freedman–Diaconis histogram for one metric.
///
/// Exposed for the rendering collaborator, which draws the histograms
/// this module only measures.
///
/// # Errors
///
/// [`AnalysisError::Schema`] if a cohort's metric extraction fails.
pub fn cohort_histograms(
    dataset: &CohortDataset,
    metric: Metric,
) -> Result<Vec<CohortHistogram>, AnalysisFailure> {
    dataset
        .iter()
        .map(|cohort| {
            let values = cohort
                .metric_values(metric)
                .map_err(|error| AnalysisFailure::new(Some(cohort.label()), metric, error))?;
            let histogram = Histogram::freedman_diaconis(values).ok_or_else(|| {
                AnalysisFailure::new(
                    Some(cohort.label()),
                    metric,
                    AnalysisError::InsufficientSample {
                        observed: 0,
                        required: 1,
                    },
                )
            })?;
            Ok(CohortHistogram {
                label: cohort.label().to_owned(),
                histogram,
            })
        })
        .collect()
}

/// The shared count-axis upper bound for one metric: the tallest bin
/// across all cohorts plus [`AXIS_MARGIN`].
///
/// # Errors
///
/// Propagates the failures of [`cohort_histograms`].
pub fn shared_axis_max(dataset: &CohortDataset, metric: Metric) -> Result<u64, AnalysisFailure> {
    let histograms = cohort_histograms(dataset, metric)?;
    let tallest_bin = histograms
        .iter()
        .map(|cohort| cohort.histogram.max_count())
        .max()
        .unwrap_or(0);
    Ok(tallest_bin + AXIS_MARGIN)
}
