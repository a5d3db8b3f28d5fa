//! One-way analysis of variance.

use statrs::distribution::{ContinuousCDF as _, FisherSnedecor};

use crate::descriptive;

/// Result of a one-way ANOVA across k independent groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneWayAnova {
    /// The F statistic: between-group mean square over within-group
    /// mean square.
    pub f_statistic: f64,
    /// Upper-tail probability of the F distribution at the observed
    /// statistic.
    pub p_value: f64,
    /// Between-group degrees of freedom (k - 1).
    pub df_between: usize,
    /// Within-group degrees of freedom (N - k).
    pub df_within: usize,
}

/// Tests whether the means of k groups differ, against the null
/// hypothesis that all group means are equal.
///
/// Group sizes may differ. The computation is a pure fold over the
/// groups; input order does not affect the result.
///
/// # Returns
///
/// * `Some(OneWayAnova)` - for at least two non-empty groups with
///   positive within-group variance and at least one within-group
///   degree of freedom
/// * `None` - otherwise
///
/// # Examples
///
/// ```
/// # use mmci_stats::anova::one_way_anova;
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [2.0, 3.0, 4.0, 5.0, 6.0];
/// let result = one_way_anova(&[&a, &b]).unwrap();
/// assert_eq!(result.df_between, 1);
/// assert_eq!(result.df_within, 8);
/// assert!((result.f_statistic - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn one_way_anova(groups: &[&[f64]]) -> Option<OneWayAnova> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|group| group.is_empty()) {
        return None;
    }
    let total: usize = groups.iter().map(|group| group.len()).sum();
    if total <= k {
        return None;
    }

    let group_means: Vec<f64> = groups
        .iter()
        .map(|group| descriptive::mean(group))
        .collect::<Option<_>>()?;
    let grand_mean = groups.iter().flat_map(|group| group.iter()).sum::<f64>() / total as f64;

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(group, mean)| group.len() as f64 * (mean - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(group, mean)| group.iter().map(|v| (v - mean).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1;
    let df_within = total - k;
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    if !ms_within.is_finite() || ms_within <= 0.0 {
        return None;
    }

    let f_statistic = ms_between / ms_within;
    if !f_statistic.is_finite() || f_statistic < 0.0 {
        return None;
    }

    let f_dist = FisherSnedecor::new(df_between as f64, df_within as f64).ok()?;
    let p_value = (1.0 - f_dist.cdf(f_statistic)).clamp(0.0, 1.0);

    Some(OneWayAnova {
        f_statistic,
        p_value,
        df_between,
        df_within,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_two_groups() {
        let a = [1.0, 2.0, 3.0];
        assert!(one_way_anova(&[&a]).is_none());
    }

    #[test]
    fn test_rejects_empty_group() {
        let a = [1.0, 2.0, 3.0];
        let b: [f64; 0] = [];
        assert!(one_way_anova(&[&a, &b]).is_none());
    }

    #[test]
    fn test_rejects_exhausted_within_degrees_of_freedom() {
        // N = k: every group a singleton.
        assert!(one_way_anova(&[&[1.0], &[2.0]]).is_none());
    }

    #[test]
    fn test_rejects_zero_within_variance() {
        let a = [3.0, 3.0, 3.0];
        let b = [7.0, 7.0, 7.0];
        assert!(one_way_anova(&[&a, &b]).is_none());
    }

    #[test]
    fn test_identical_groups_give_zero_f() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0, 3.0];
        let result = one_way_anova(&[&a, &b]).unwrap();
        assert_eq!(result.f_statistic, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unequal_group_sizes_degrees_of_freedom() {
        let a: Vec<f64> = (0..10).map(f64::from).collect();
        let b: Vec<f64> = (0..12).map(|v| f64::from(v) + 5.0).collect();
        let c: Vec<f64> = (0..9).map(|v| f64::from(v) + 10.0).collect();
        let result = one_way_anova(&[&a, &b, &c]).unwrap();
        assert_eq!(result.df_between, 2);
        assert_eq!(result.df_within, 28);
        assert!(result.f_statistic > 0.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_known_f_value() {
        // Means 3 and 4, grand mean 3.5: SSB = 2.5, SSW = 20,
        // F = (2.5 / 1) / (20 / 8) = 1.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 3.0, 4.0, 5.0, 6.0];
        let result = one_way_anova(&[&a, &b]).unwrap();
        assert!((result.f_statistic - 1.0).abs() < 1e-12);
        // F(1, 8) upper tail at 1 is about 0.347.
        assert!(result.p_value > 0.3 && result.p_value < 0.4);
    }

    #[test]
    fn test_group_order_irrelevant() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 5.0, 6.0, 7.0];
        let c = [0.5, 1.5, 2.5, 9.0];
        let forward = one_way_anova(&[&a, &b, &c]).unwrap();
        let backward = one_way_anova(&[&c, &b, &a]).unwrap();
        assert!((forward.f_statistic - backward.f_statistic).abs() < 1e-12);
        assert!((forward.p_value - backward.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_distinct_means_give_large_f() {
        let a = [1.0, 1.1, 0.9, 1.05, 0.95];
        let b = [5.0, 5.1, 4.9, 5.05, 4.95];
        let result = one_way_anova(&[&a, &b]).unwrap();
        assert!(result.f_statistic > 100.0);
        assert!(result.p_value < 1e-6);
    }
}
