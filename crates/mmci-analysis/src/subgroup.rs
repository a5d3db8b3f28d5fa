//! Age-threshold subgroup means.
//!
//! Each cohort's metric values are partitioned into a younger and an
//! older subgroup at a configurable age threshold, and each subgroup's
//! arithmetic mean is computed alongside the cohort's overall mean.
//! The original analysis drew these three means as horizontal lines on
//! its jitter plots.

use mmci_stats::descriptive;
use serde::{Deserialize, Serialize};

use crate::dataset::{Cohort, Metric};
use crate::error::AnalysisError;

/// Default age threshold separating the subgroups: ages below it are
/// "younger", the rest "older".
pub const DEFAULT_AGE_THRESHOLD: u32 = 24;

/// Which side of the age threshold a subgroup covers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub enum AgeGroup {
    #[display("younger")]
    Younger,
    #[display("older")]
    Older,
}

/// Subgroup and overall means for one cohort and metric.
///
/// A subgroup mean is `None` exactly when that subgroup held no
/// observations; the split that produced it reports the corresponding
/// [`AnalysisError::EmptySubgroup`] so the absence is signaled, never
/// a silent zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubgroupMeans {
    pub younger_mean: Option<f64>,
    pub older_mean: Option<f64>,
    pub overall_mean: f64,
}

/// Splits one cohort's metric values at `age_threshold` and computes
/// the three means.
///
/// Returns the means together with the empty-subgroup failures, if
/// any; an empty subgroup does not invalidate the other subgroup's
/// mean or the overall mean.
///
/// # Errors
///
/// [`AnalysisError::Schema`] if metric extraction fails.
pub fn split_means(
    cohort: &Cohort,
    metric: Metric,
    age_threshold: u32,
) -> Result<(SubgroupMeans, Vec<AnalysisError>), AnalysisError> {
    let values = cohort.metric_values(metric)?;

    let mut younger = vec![];
    let mut older = vec![];
    for (observation, value) in cohort.observations().iter().zip(&values) {
        if observation.age < age_threshold {
            younger.push(*value);
        } else {
            older.push(*value);
        }
    }

    // The cohort is non-empty by construction, so the overall mean
    // always exists.
    let overall_mean = descriptive::mean(&values).ok_or(AnalysisError::InsufficientSample {
        observed: 0,
        required: 1,
    })?;

    let mut failures = vec![];
    let younger_mean = descriptive::mean(&younger);
    if younger_mean.is_none() {
        failures.push(AnalysisError::EmptySubgroup {
            subgroup: AgeGroup::Younger,
        });
    }
    let older_mean = descriptive::mean(&older);
    if older_mean.is_none() {
        failures.push(AnalysisError::EmptySubgroup {
            subgroup: AgeGroup::Older,
        });
    }

    Ok((
        SubgroupMeans {
            younger_mean,
            older_mean,
            overall_mean,
        },
        failures,
    ))
}
