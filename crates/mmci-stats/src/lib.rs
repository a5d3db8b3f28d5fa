//! Statistical primitives for the MMCI cohort comparison project.
//!
//! This crate provides the numeric building blocks the analysis engine
//! composes per cohort:
//!
//! - **Descriptive statistics**: mean, population and sample variance
//! - **Quantiles**: linear-interpolation quantiles and interquartile range
//! - **Histogram generation**: equal-width histograms with the
//!   Freedman–Diaconis bin-count rule
//! - **Normal probability plots**: Filliben order-statistic-median
//!   plotting positions against the standard normal distribution
//! - **Shapiro–Wilk test**: the W statistic and p-value via Royston's
//!   AS R94 approximation
//! - **One-way ANOVA**: F statistic and p-value across k independent
//!   groups
//!
//! All functions operate on `f64` samples. Degenerate input (empty
//! slices, too-small samples, zero variance where a test is undefined)
//! yields `None`; interpreting that as a specific error is the caller's
//! concern.
//!
//! # Examples
//!
//! ```
//! use mmci_stats::descriptive;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(descriptive::mean(&values), Some(3.0));
//! assert_eq!(descriptive::population_variance(&values), Some(2.0));
//! ```

pub mod anova;
pub mod descriptive;
pub mod histogram;
pub mod plotting;
pub mod quantiles;
pub mod shapiro;
