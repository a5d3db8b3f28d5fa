//! Normal probability plot coordinates.
//!
//! A probability plot pairs each order statistic of a sample with the
//! standard normal quantile expected at its plotting position. Near
//! linearity of the pairs indicates an approximately normal sample.
//! Plotting positions use Filliben's order-statistic-median estimate.

use statrs::distribution::{ContinuousCDF as _, Normal};

/// Filliben's estimated medians of the uniform order statistics.
///
/// For a sample of size `n`:
///
/// - `m_1 = 1 - 0.5^(1/n)`
/// - `m_n = 0.5^(1/n)`
/// - `m_i = (i - 0.3175) / (n + 0.365)` for the interior positions
///
/// # Examples
///
/// ```
/// # use mmci_stats::plotting::filliben_positions;
/// let positions = filliben_positions(3);
/// assert_eq!(positions.len(), 3);
/// assert!((positions[1] - 0.5).abs() < 1e-8);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn filliben_positions(n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![0.5];
    }
    let size = n as f64;
    (1..=n)
        .map(|i| {
            if i == 1 {
                1.0 - 0.5_f64.powf(1.0 / size)
            } else if i == n {
                0.5_f64.powf(1.0 / size)
            } else {
                (i as f64 - 0.3175) / (size + 0.365)
            }
        })
        .collect()
}

/// Probability-plot coordinates for a sorted sample against the
/// standard normal distribution.
///
/// Each returned pair is `(theoretical, sample)`: the standard normal
/// quantile at the value's plotting position, and the observed order
/// statistic. The output length equals the sample size and the sample
/// coordinates are ascending.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// # use mmci_stats::plotting::normal_plotting_points;
/// let points = normal_plotting_points(&[1.0, 2.0, 3.0]);
/// assert_eq!(points.len(), 3);
/// // Median value maps to the distribution's center.
/// assert!(points[1].0.abs() < 1e-8);
/// ```
#[must_use]
pub fn normal_plotting_points(sorted_values: &[f64]) -> Vec<(f64, f64)> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let normal = standard_normal();
    filliben_positions(sorted_values.len())
        .into_iter()
        .zip(sorted_values.iter().copied())
        .map(|(position, value)| (normal.inverse_cdf(position), value))
        .collect()
}

fn standard_normal() -> Normal {
    // Fixed, valid parameters; construction cannot fail.
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}
