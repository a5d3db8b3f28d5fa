//! Per-cohort variance under a pinned estimator convention.
//!
//! The original analysis mixed population and sample variance across
//! metrics without rationale. Here exactly one convention applies to a
//! whole run, chosen by the caller and recorded in the report, so
//! consumers can never mistake which estimator produced a number.

use mmci_stats::descriptive;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Which variance estimator a run uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    derive_more::Display,
    derive_more::FromStr,
    Serialize,
    Deserialize,
)]
pub enum VarianceConvention {
    /// Divide by `n`.
    #[default]
    #[display("population")]
    Population,
    /// Divide by `n - 1`.
    #[display("sample")]
    Sample,
}

impl VarianceConvention {
    /// Minimum sample size the estimator is defined for.
    #[must_use]
    pub fn min_samples(self) -> usize {
        match self {
            VarianceConvention::Population => 1,
            VarianceConvention::Sample => 2,
        }
    }
}

/// Computes one cohort's variance for one metric.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSample`] below the estimator's minimum
/// sample size.
pub fn variance(values: &[f64], convention: VarianceConvention) -> Result<f64, AnalysisError> {
    let required = convention.min_samples();
    if values.len() < required {
        return Err(AnalysisError::InsufficientSample {
            observed: values.len(),
            required,
        });
    }
    let variance = match convention {
        VarianceConvention::Population => descriptive::population_variance(values),
        VarianceConvention::Sample => descriptive::sample_variance(values),
    };
    variance.ok_or(AnalysisError::InsufficientSample {
        observed: values.len(),
        required,
    })
}

/// The 4-decimal rendering consumers annotate plots with.
#[must_use]
pub fn display_variance(variance: f64) -> String {
    format!("{variance:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_variance() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(variance(&values, VarianceConvention::Population), Ok(2.0));
    }

    #[test]
    fn test_sample_variance() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(variance(&values, VarianceConvention::Sample), Ok(2.5));
    }

    #[test]
    fn test_constant_sample_is_valid_zero() {
        // Zero variance is a real statistic here, unlike for the
        // normality test.
        let values = [5.0; 5];
        assert_eq!(variance(&values, VarianceConvention::Population), Ok(0.0));
    }

    #[test]
    fn test_minimum_sizes_differ_by_convention() {
        let single = [3.0];
        assert!(variance(&single, VarianceConvention::Population).is_ok());
        assert_eq!(
            variance(&single, VarianceConvention::Sample),
            Err(AnalysisError::InsufficientSample {
                observed: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_reordering_invariant() {
        let a = [3.0, 1.0, 4.0, 1.5, 5.0];
        let b = [5.0, 1.5, 4.0, 1.0, 3.0];
        let forward = variance(&a, VarianceConvention::Sample).unwrap();
        let backward = variance(&b, VarianceConvention::Sample).unwrap();
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn test_display_rounding() {
        assert_eq!(display_variance(2.0), "2.0000");
        assert_eq!(display_variance(1.234_567), "1.2346");
    }

    #[test]
    fn test_convention_parses_from_cli_token() {
        assert_eq!(
            "population".parse::<VarianceConvention>().unwrap(),
            VarianceConvention::Population
        );
        assert_eq!(
            "sample".parse::<VarianceConvention>().unwrap(),
            VarianceConvention::Sample
        );
    }
}
