//! Report assembly: every analyzer's output for one metric, collected
//! with the failures that occurred along the way.
//!
//! A failure in one cohort's diagnostic never aborts the others; the
//! affected entry is simply absent from its section and a located
//! failure record takes its place. ANOVA alone is metric-fatal, since
//! it cannot be computed around a degenerate cohort.

use serde::{Deserialize, Serialize};

use crate::anova::{self, AnovaResult};
use crate::axis;
use crate::dataset::{CohortDataset, Metric};
use crate::dispersion::{self, VarianceConvention};
use crate::error::AnalysisFailure;
use crate::normality::NormalityDiagnostics;
use crate::subgroup::{self, SubgroupMeans};

/// Run-level configuration: the domain constants the analyzers share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Age below which an observation counts as "younger".
    pub age_threshold: u32,
    /// Variance estimator applied to every cohort this run.
    pub variance_convention: VarianceConvention,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            age_threshold: subgroup::DEFAULT_AGE_THRESHOLD,
            variance_convention: VarianceConvention::default(),
        }
    }
}

/// Normality diagnostics for one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortNormality {
    pub cohort: String,
    pub diagnostics: NormalityDiagnostics,
}

/// Variance for one cohort, under the run's convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortDispersion {
    pub cohort: String,
    pub variance: f64,
}

impl CohortDispersion {
    /// The 4-decimal rendering consumers annotate plots with.
    #[must_use]
    pub fn display_variance(&self) -> String {
        dispersion::display_variance(self.variance)
    }
}

/// Subgroup means for one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSubgroups {
    pub cohort: String,
    pub means: SubgroupMeans,
}

/// Aggregate analysis results for one metric, in dataset cohort order.
///
/// A pure value object: constructed once per metric per run, never
/// mutated, consumed by the reporting/rendering collaborator. Sections
/// hold the cohorts that succeeded; everything that failed is in
/// `failures`, located by cohort. `anova` and `shared_axis_max` are
/// `None` exactly when a corresponding failure is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metric: Metric,
    pub config: AnalysisConfig,
    pub normality: Vec<CohortNormality>,
    pub dispersion: Vec<CohortDispersion>,
    pub anova: Option<AnovaResult>,
    pub shared_axis_max: Option<u64>,
    pub subgroups: Vec<CohortSubgroups>,
    pub failures: Vec<AnalysisFailure>,
}

impl AnalysisReport {
    /// Runs every analyzer for one metric and collects the results.
    ///
    /// Deterministic: the same dataset, metric, and configuration
    /// yield a bit-identical report.
    #[must_use]
    pub fn assemble(dataset: &CohortDataset, metric: Metric, config: AnalysisConfig) -> Self {
        let mut normality = vec![];
        let mut dispersion_results = vec![];
        let mut subgroups = vec![];
        let mut failures = vec![];

        for cohort in dataset {
            let label = cohort.label();
            let values = match cohort.metric_values(metric) {
                Ok(values) => values,
                Err(error) => {
                    // One schema failure covers every per-cohort
                    // diagnostic for this cohort.
                    failures.push(AnalysisFailure::new(Some(label), metric, error));
                    continue;
                }
            };

            match NormalityDiagnostics::compute(&values) {
                Ok(diagnostics) => normality.push(CohortNormality {
                    cohort: label.to_owned(),
                    diagnostics,
                }),
                Err(error) => failures.push(AnalysisFailure::new(Some(label), metric, error)),
            }

            match dispersion::variance(&values, config.variance_convention) {
                Ok(variance) => dispersion_results.push(CohortDispersion {
                    cohort: label.to_owned(),
                    variance,
                }),
                Err(error) => failures.push(AnalysisFailure::new(Some(label), metric, error)),
            }

            match subgroup::split_means(cohort, metric, config.age_threshold) {
                Ok((means, empty_subgroups)) => {
                    subgroups.push(CohortSubgroups {
                        cohort: label.to_owned(),
                        means,
                    });
                    failures.extend(
                        empty_subgroups
                            .into_iter()
                            .map(|error| AnalysisFailure::new(Some(label), metric, error)),
                    );
                }
                Err(error) => failures.push(AnalysisFailure::new(Some(label), metric, error)),
            }
        }

        let anova = match anova::across_cohorts(dataset, metric) {
            Ok(result) => Some(result),
            Err(failure) => {
                failures.push(failure);
                None
            }
        };

        let shared_axis_max = match axis::shared_axis_max(dataset, metric) {
            Ok(axis_max) => Some(axis_max),
            Err(failure) => {
                failures.push(failure);
                None
            }
        };

        Self {
            metric,
            config,
            normality,
            dispersion: dispersion_results,
            anova,
            shared_axis_max,
            subgroups,
            failures,
        }
    }

    /// The plain-text ANOVA summary line for the report writer, if
    /// ANOVA succeeded for this metric.
    #[must_use]
    pub fn anova_summary_line(&self) -> Option<String> {
        self.anova.map(|result| result.summary_line(self.metric))
    }
}
