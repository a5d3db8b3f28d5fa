//! Shapiro–Wilk normality test.
//!
//! Implements Royston's approximation (Applied Statistics algorithm
//! AS R94): Blom scores for the expected normal order statistics,
//! polynomial corrections for the two extreme weights, and
//! sample-size-banded normalizing transforms for the p-value. The
//! approximation is calibrated for samples of 3 to 5000 observations;
//! at n = 3 the p-value is exact.

use statrs::distribution::{ContinuousCDF as _, Normal};

use crate::descriptive;

/// Smallest sample size the test is defined for.
pub const MIN_SAMPLES: usize = 3;
/// Largest sample size the approximation is calibrated for.
pub const MAX_SAMPLES: usize = 5000;

/// Result of a Shapiro–Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// The W statistic, in (0, 1]; values near 1 are consistent with a
    /// normal sample.
    pub statistic: f64,
    /// Probability, under the null hypothesis of normality, of a W at
    /// least as small as observed.
    pub p_value: f64,
}

impl ShapiroWilk {
    /// Runs the test on a sorted sample.
    ///
    /// # Returns
    ///
    /// * `Some(ShapiroWilk)` - for 3 to 5000 observations with nonzero
    ///   variance
    /// * `None` - outside that sample-size range, or when every value
    ///   is identical (the statistic's denominator vanishes and the
    ///   test is undefined)
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mmci_stats::shapiro::ShapiroWilk;
    /// let values: Vec<f64> = (1..=10).map(f64::from).collect();
    /// let result = ShapiroWilk::from_sorted(&values).unwrap();
    /// assert!(result.statistic > 0.9);
    /// assert!(result.p_value > 0.1);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let n = sorted_values.len();
        if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&n) {
            return None;
        }
        let ssd = descriptive::sum_of_squared_deviations(sorted_values)?;
        if ssd <= 0.0 {
            return None;
        }

        let weights = coefficients(n);
        let weighted_sum: f64 = weights
            .iter()
            .zip(sorted_values)
            .map(|(a, x)| a * x)
            .sum();
        let statistic = (weighted_sum * weighted_sum / ssd).min(1.0);
        let p_value = p_value(statistic, n);

        Some(Self { statistic, p_value })
    }
}

/// Royston's approximate weights for the ordered sample.
///
/// The weights are antisymmetric (`a_i = -a_{n+1-i}`). The two extreme
/// weights carry polynomial corrections in `1/sqrt(n)`; interior
/// weights are rescaled Blom scores.
#[expect(clippy::cast_precision_loss)]
fn coefficients(n: usize) -> Vec<f64> {
    if n == 3 {
        return vec![-std::f64::consts::FRAC_1_SQRT_2, 0.0, std::f64::consts::FRAC_1_SQRT_2];
    }

    let normal = standard_normal();
    let size = n as f64;
    // Blom scores: expected normal order statistics.
    let m: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (size + 0.25)))
        .collect();
    let ssq_m: f64 = m.iter().map(|v| v * v).sum();
    let norm = ssq_m.sqrt();
    let u = 1.0 / size.sqrt();

    let mut a = vec![0.0; n];
    let a_last = m[n - 1] / norm
        + u * (0.221157 + u * (-0.147981 + u * (-2.071190 + u * (4.434685 + u * -2.706056))));

    if n <= 5 {
        let phi = (ssq_m - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_last * a_last);
        let scale = phi.sqrt();
        for i in 1..n - 1 {
            a[i] = m[i] / scale;
        }
        a[n - 1] = a_last;
        a[0] = -a_last;
    } else {
        let a_penultimate = m[n - 2] / norm
            + u * (0.042981 + u * (-0.293762 + u * (-1.752461 + u * (5.682633 + u * -3.582633))));
        let phi = (ssq_m - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * a_last * a_last - 2.0 * a_penultimate * a_penultimate);
        let scale = phi.sqrt();
        for i in 2..n - 2 {
            a[i] = m[i] / scale;
        }
        a[n - 1] = a_last;
        a[n - 2] = a_penultimate;
        a[0] = -a_last;
        a[1] = -a_penultimate;
    }
    a
}

/// Royston's p-value for an observed W at sample size n.
///
/// Exact at n = 3; otherwise W is transformed to an approximately
/// standard normal deviate whose upper tail is the p-value.
#[expect(clippy::cast_precision_loss)]
fn p_value(statistic: f64, n: usize) -> f64 {
    if n == 3 {
        let p = 6.0 / std::f64::consts::PI
            * (statistic.sqrt().asin() - 0.75_f64.sqrt().asin());
        return p.clamp(0.0, 1.0);
    }
    if statistic >= 1.0 {
        return 1.0;
    }

    let size = n as f64;
    let (z_numerator, mu, sigma) = if n <= 11 {
        let gamma = -2.273 + 0.459 * size;
        let w = -(gamma - (1.0 - statistic).ln()).ln();
        let mu = 0.5440 + size * (-0.39978 + size * (0.025054 + size * -0.0006714));
        let sigma = (1.3822 + size * (-0.77857 + size * (0.062767 + size * -0.0020322))).exp();
        (w, mu, sigma)
    } else {
        let log_n = size.ln();
        let w = (1.0 - statistic).ln();
        let mu = -1.5861 + log_n * (-0.31082 + log_n * (-0.083751 + log_n * 0.0038915));
        let sigma = (-0.4803 + log_n * (-0.082676 + log_n * 0.0030302)).exp();
        (w, mu, sigma)
    };

    let z = (z_numerator - mu) / sigma;
    (1.0 - standard_normal().cdf(z)).clamp(0.0, 1.0)
}

fn standard_normal() -> Normal {
    // Fixed, valid parameters; construction cannot fail.
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_too_small() {
        assert!(ShapiroWilk::from_sorted(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_sample_too_large() {
        let values: Vec<f64> = (0..=5000).map(f64::from).collect();
        assert!(ShapiroWilk::from_sorted(&values).is_none());
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        assert!(ShapiroWilk::from_sorted(&[5.0, 5.0, 5.0, 5.0, 5.0]).is_none());
    }

    #[test]
    fn test_symmetric_three_points_are_perfectly_normal() {
        // Equally spaced three points fit the normal quantiles exactly.
        let result = ShapiroWilk::from_sorted(&[-1.0, 0.0, 1.0]).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_point_lower_bound() {
        // For n = 3, W is bounded below by 0.75, where the exact
        // p-value is 0.
        let result = ShapiroWilk::from_sorted(&[0.0, 0.0, 1.0]).unwrap();
        assert!((result.statistic - 0.75).abs() < 1e-12);
        assert!(result.p_value < 1e-9);
    }

    #[test]
    fn test_uniform_sample_not_rejected() {
        let values: Vec<f64> = (1..=20).map(f64::from).collect();
        let result = ShapiroWilk::from_sorted(&values).unwrap();
        assert!(result.statistic > 0.9);
        assert!(result.p_value > 0.05);
    }

    #[test]
    fn test_extreme_outlier_rejected() {
        let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
        values.push(100.0);
        let result = ShapiroWilk::from_sorted(&values).unwrap();
        assert!(result.statistic < 0.8);
        assert!(result.p_value < 0.01);
    }

    #[test]
    fn test_statistic_in_unit_interval() {
        let samples: [&[f64]; 3] = [
            &[0.5, 1.0, 1.5, 2.0, 8.0],
            &[-3.0, -1.0, 0.0, 1.0, 3.0, 9.0, 12.0],
            &[1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0],
        ];
        for sample in samples {
            let result = ShapiroWilk::from_sorted(sample).unwrap();
            assert!(result.statistic > 0.0 && result.statistic <= 1.0);
            assert!((0.0..=1.0).contains(&result.p_value));
        }
    }

    #[test]
    fn test_weights_are_antisymmetric() {
        for n in [4, 5, 6, 12, 25] {
            let a = coefficients(n);
            for i in 0..n {
                // Tolerance follows the precision of the normal
                // quantile approximation, not machine epsilon.
                assert!((a[i] + a[n - 1 - i]).abs() < 1e-7, "n={n} i={i}");
            }
        }
    }
}
