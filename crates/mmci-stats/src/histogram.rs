//! Histogram construction with data-driven bin counts.

use std::ops::Range;

use crate::quantiles;

/// A frequency histogram over a sample's full value range.
///
/// Bins are equal-width and span `[min, max]`; the number of bins comes
/// from the Freedman–Diaconis rule, so bin granularity adapts to the
/// sample's spread and size rather than being fixed.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending value order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start,
    /// exclusive end). The final bin's end lies just above the sample
    /// maximum so the maximum is counted.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a Freedman–Diaconis histogram from unsorted values.
    ///
    /// The bin width target is `2 * IQR * n^(-1/3)`; the bin count is
    /// the number of such widths needed to span the data, with the
    /// actual width stretched so the bins tile `[min, max]` exactly.
    /// A sample with zero spread or zero IQR collapses to a single bin
    /// holding every observation.
    ///
    /// # Returns
    ///
    /// * `Some(Histogram)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use mmci_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::freedman_diaconis(values).unwrap();
    /// let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
    /// assert_eq!(total, 10);
    /// ```
    #[must_use]
    pub fn freedman_diaconis<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Creates a Freedman–Diaconis histogram from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let span = max - min;

        let num_bins = freedman_diaconis_bin_count(sorted_values);
        if span <= 0.0 || num_bins == 1 {
            // All bins would coincide; one bin holds the whole sample.
            return Some(Self {
                bins: vec![HistogramBin {
                    range: min..max.next_up(),
                    count: sorted_values.len() as u64,
                }],
            });
        }

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute boundaries from the span to avoid
                // floating-point accumulation across bins.
                let start = min + span * (bin_idx as f64) / (num_bins as f64);
                let mut end = min + span * ((bin_idx + 1) as f64) / (num_bins as f64);
                if bin_idx == num_bins - 1 {
                    end = max.next_up();
                }
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &value in sorted_values {
            let normalized_position = (value - min) / span * (num_bins as f64);
            let idx = (normalized_position.floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Some(Self { bins })
    }

    /// Returns the largest bin count in the histogram.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mmci_stats::histogram::Histogram;
    /// let values = [1.0, 1.1, 1.2, 9.0];
    /// let histogram = Histogram::freedman_diaconis(values).unwrap();
    /// assert!(histogram.max_count() >= 3);
    /// ```
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

/// Number of bins the Freedman–Diaconis rule prescribes for a sorted
/// sample. At least 1; exactly 1 whenever the rule's bin width or the
/// sample's spread degenerates to zero.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn freedman_diaconis_bin_count(sorted_values: &[f64]) -> usize {
    let n = sorted_values.len();
    if n < 2 {
        return 1;
    }
    let span = sorted_values[n - 1] - sorted_values[0];
    let Some(iqr) = quantiles::interquartile_range_sorted(sorted_values) else {
        return 1;
    };
    let bin_width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
    if bin_width <= 0.0 || span <= 0.0 {
        return 1;
    }
    ((span / bin_width).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert!(Histogram::freedman_diaconis([]).is_none());
    }

    #[test]
    fn test_single_value_single_bin() {
        let histogram = Histogram::freedman_diaconis([4.0]).unwrap();
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 1);
    }

    #[test]
    fn test_constant_sample_single_bin() {
        let histogram = Histogram::freedman_diaconis([5.0; 7]).unwrap();
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 7);
        assert_eq!(histogram.max_count(), 7);
    }

    #[test]
    fn test_bin_count_matches_rule() {
        // n = 10, IQR = 4.5, width = 9 / 10^(1/3) ~= 4.177,
        // span = 9 -> ceil(9 / 4.177) = 3 bins.
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(freedman_diaconis_bin_count(&values), 3);
    }

    #[test]
    fn test_every_value_counted_once() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let histogram = Histogram::from_sorted(&values).unwrap();
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_maximum_lands_in_final_bin() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let histogram = Histogram::from_sorted(&values).unwrap();
        let last = histogram.bins.last().unwrap();
        assert!(last.range.contains(&10.0));
    }

    #[test]
    fn test_max_count_is_largest_bin() {
        // 3 bins of width 3 over [1, 10]: {1,2,3}, {4,5,6}, {7,8,9,10}
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let histogram = Histogram::from_sorted(&values).unwrap();
        assert_eq!(histogram.max_count(), 4);
    }

    #[test]
    fn test_max_count_non_decreasing_with_more_data() {
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        let before = Histogram::freedman_diaconis(values.clone()).unwrap().max_count();
        values.push(5.5);
        let after = Histogram::freedman_diaconis(values).unwrap().max_count();
        assert!(after >= before);
    }
}
