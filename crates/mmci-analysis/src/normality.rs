//! Per-cohort normality diagnostics.
//!
//! For one cohort and metric this produces the two artifacts a reader
//! uses to judge normality: the normal probability plot coordinates and
//! the Shapiro–Wilk test. Both are computed from the same sorted copy
//! of the sample.

use mmci_stats::{plotting, shapiro::ShapiroWilk};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One probability-plot coordinate: the standard normal quantile
/// expected at the value's plotting position, and the observed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityPlotPoint {
    pub theoretical: f64,
    pub sample: f64,
}

/// Normality diagnostics for one cohort and metric.
///
/// The stored statistic and p-value are full precision; the
/// `display_*` accessors provide the rounded renderings consumers
/// annotate plots with (W to two decimals, p in scientific notation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityDiagnostics {
    /// Probability-plot coordinates, ascending by sample value. Length
    /// equals the cohort's sample size.
    pub probability_plot: Vec<ProbabilityPlotPoint>,
    /// The Shapiro–Wilk W statistic, unrounded.
    pub shapiro_statistic: f64,
    /// The Shapiro–Wilk p-value, unrounded.
    pub shapiro_p_value: f64,
}

impl NormalityDiagnostics {
    /// Computes the diagnostics for one metric sample.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::InsufficientSample`] for fewer than 3 values
    /// * [`AnalysisError::SampleTooLarge`] beyond the Shapiro–Wilk
    ///   approximation's calibrated range
    /// * [`AnalysisError::DegenerateSample`] when every value is
    ///   identical; the test statistic is undefined there and must not
    ///   leak out as NaN
    pub fn compute(values: &[f64]) -> Result<Self, AnalysisError> {
        let n = values.len();
        if n < mmci_stats::shapiro::MIN_SAMPLES {
            return Err(AnalysisError::InsufficientSample {
                observed: n,
                required: mmci_stats::shapiro::MIN_SAMPLES,
            });
        }
        if n > mmci_stats::shapiro::MAX_SAMPLES {
            return Err(AnalysisError::SampleTooLarge {
                observed: n,
                limit: mmci_stats::shapiro::MAX_SAMPLES,
            });
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        if sorted.first() == sorted.last() {
            return Err(AnalysisError::DegenerateSample);
        }

        let probability_plot = plotting::normal_plotting_points(&sorted)
            .into_iter()
            .map(|(theoretical, sample)| ProbabilityPlotPoint {
                theoretical,
                sample,
            })
            .collect();
        let shapiro =
            ShapiroWilk::from_sorted(&sorted).ok_or(AnalysisError::DegenerateSample)?;

        Ok(Self {
            probability_plot,
            shapiro_statistic: shapiro.statistic,
            shapiro_p_value: shapiro.p_value,
        })
    }

    /// The W statistic rounded for display, e.g. `0.97`.
    #[must_use]
    pub fn display_statistic(&self) -> String {
        format!("{:.2}", self.shapiro_statistic)
    }

    /// The p-value in scientific notation for display, e.g. `1.73e-1`.
    #[must_use]
    pub fn display_p_value(&self) -> String {
        format!("{:.2e}", self.shapiro_p_value)
    }
}
