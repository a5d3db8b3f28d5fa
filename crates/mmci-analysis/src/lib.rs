//! Statistical comparison engine for year-labeled cohorts of clinical
//! continuity-of-care observations.
//!
//! Each observation records a patient age and two continuity scores
//! (resident and attending). Cohorts group observations by collection
//! year; this crate answers, per metric, whether the cohorts look
//! normally distributed, how dispersed they are, and whether their
//! means differ, and derives the shared aggregates a renderer needs to
//! display the cohorts side by side.
//!
//! # Pipeline
//!
//! 1. **Build a dataset** ([`dataset::CohortDataset`]): ordered,
//!    immutable cohorts from the ingestion collaborator
//! 2. **Assemble a report** ([`report::AnalysisReport`]): runs every
//!    analyzer for one metric and collects successes alongside
//!    per-cohort failures
//!
//! The individual analyzers are public for callers that want a single
//! diagnostic:
//!
//! - [`normality`]: normal probability plot and Shapiro–Wilk test
//! - [`dispersion`]: variance under a pinned estimator convention
//! - [`anova`]: one-way ANOVA across all cohorts
//! - [`axis`]: shared histogram axis bound for comparative displays
//! - [`subgroup`]: age-threshold subgroup means
//!
//! Everything is a pure function of its input: no randomness, no
//! wall-clock, no shared mutable state. Re-running any computation on
//! the same dataset yields bit-identical results.
//!
//! # Examples
//!
//! ```
//! use mmci_analysis::dataset::{Cohort, CohortDataset, Metric, Observation};
//! use mmci_analysis::report::{AnalysisConfig, AnalysisReport};
//!
//! let cohorts = vec![
//!     Cohort::new(
//!         "20180701_20190630",
//!         vec![
//!             Observation { age: 21, resident: 3.1, attending: 4.0 },
//!             Observation { age: 25, resident: 4.2, attending: 5.5 },
//!             Observation { age: 33, resident: 5.0, attending: 5.1 },
//!             Observation { age: 40, resident: 6.3, attending: 6.0 },
//!         ],
//!     )?,
//!     Cohort::new(
//!         "20190701_20200630",
//!         vec![
//!             Observation { age: 22, resident: 4.0, attending: 4.8 },
//!             Observation { age: 27, resident: 5.1, attending: 5.9 },
//!             Observation { age: 35, resident: 6.2, attending: 6.4 },
//!             Observation { age: 51, resident: 7.0, attending: 7.1 },
//!         ],
//!     )?,
//! ];
//! let dataset = CohortDataset::new(cohorts)?;
//!
//! let report = AnalysisReport::assemble(&dataset, Metric::Resident, AnalysisConfig::default());
//! assert_eq!(report.normality.len(), 2);
//! # Ok::<(), mmci_analysis::error::AnalysisError>(())
//! ```

pub mod anova;
pub mod axis;
pub mod dataset;
pub mod dispersion;
pub mod error;
pub mod normality;
pub mod report;
pub mod subgroup;
