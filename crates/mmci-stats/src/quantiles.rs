//! Quantile computation on sorted data.
//!
//! Quantiles are computed with linear interpolation between the two
//! nearest order statistics, the convention histogram bin-width rules
//! expect. The nearest-rank method would bias the interquartile range
//! on small samples.

/// Computes a single quantile from sorted data by linear interpolation.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `q` - The quantile to compute, in `[0.0, 1.0]`
///
/// # Returns
///
/// * `Some(value)` - the interpolated quantile
/// * `None` - if the input is empty
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order or `q`
/// is outside `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// # use mmci_stats::quantiles::quantile_sorted;
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile_sorted(&values, 0.5), Some(3.0));
/// assert_eq!(quantile_sorted(&values, 0.25), Some(2.0));
/// ```
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    assert!((0.0..=1.0).contains(&q), "quantile must be in [0.0, 1.0]");

    if sorted_values.is_empty() {
        return None;
    }
    let position = (sorted_values.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let fraction = position - position.floor();
    let value = if fraction == 0.0 {
        sorted_values[lower]
    } else {
        sorted_values[lower] + fraction * (sorted_values[lower + 1] - sorted_values[lower])
    };
    Some(value)
}

/// Computes the interquartile range (Q3 - Q1) from sorted data.
///
/// # Examples
///
/// ```
/// # use mmci_stats::quantiles::interquartile_range_sorted;
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(interquartile_range_sorted(&values), Some(2.0));
/// ```
#[must_use]
pub fn interquartile_range_sorted(sorted_values: &[f64]) -> Option<f64> {
    let q1 = quantile_sorted(sorted_values, 0.25)?;
    let q3 = quantile_sorted(sorted_values, 0.75)?;
    Some(q3 - q1)
}
