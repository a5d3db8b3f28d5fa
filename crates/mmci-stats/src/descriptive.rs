//! Central tendency and dispersion estimators.

/// Computes the arithmetic mean.
///
/// # Returns
///
/// * `Some(mean)` - if the dataset contains at least one value
/// * `None` - if the dataset is empty
///
/// # Examples
///
/// ```
/// # use mmci_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Computes the sum of squared deviations from the mean.
///
/// This is the shared numerator of both variance estimators and the
/// denominator of the Shapiro–Wilk W statistic.
///
/// # Returns
///
/// * `Some(ssd)` - if the dataset contains at least one value
/// * `None` - if the dataset is empty
#[must_use]
pub fn sum_of_squared_deviations(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum())
}

/// Computes the population variance (divisor `n`).
///
/// # Returns
///
/// * `Some(variance)` - if the dataset contains at least one value
/// * `None` - if the dataset is empty
///
/// # Examples
///
/// ```
/// # use mmci_stats::descriptive::population_variance;
/// assert_eq!(population_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(2.0));
/// assert_eq!(population_variance(&[5.0, 5.0, 5.0]), Some(0.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let ssd = sum_of_squared_deviations(values)?;
    Some(ssd / values.len() as f64)
}

/// Computes the sample variance (divisor `n - 1`).
///
/// # Returns
///
/// * `Some(variance)` - if the dataset contains at least two values
/// * `None` - otherwise
///
/// # Examples
///
/// ```
/// # use mmci_stats::descriptive::sample_variance;
/// assert_eq!(sample_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(2.5));
/// assert_eq!(sample_variance(&[1.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ssd = sum_of_squared_deviations(values)?;
    Some(ssd / (values.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[7.5]), Some(7.5));
    }

    #[test]
    fn test_variance_conventions_differ() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(population_variance(&values), Some(2.0));
        assert_eq!(sample_variance(&values), Some(2.5));
    }

    #[test]
    fn test_variance_invariant_under_reordering() {
        let a = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let mut b = a;
        b.reverse();
        assert_eq!(population_variance(&a), population_variance(&b));
        assert_eq!(sample_variance(&a), sample_variance(&b));
    }

    #[test]
    fn test_sample_variance_minimum_size() {
        assert_eq!(sample_variance(&[1.0]), None);
        assert_eq!(population_variance(&[1.0]), Some(0.0));
    }

    #[test]
    fn test_constant_sample_has_zero_variance() {
        let values = [5.0; 5];
        assert_eq!(population_variance(&values), Some(0.0));
        assert_eq!(sample_variance(&values), Some(0.0));
    }
}
