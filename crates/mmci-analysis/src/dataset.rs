//! The cohort data model.
//!
//! A dataset is an ordered, immutable collection of labeled cohorts,
//! each holding the observations collected over one year. The engine
//! only ever reads it; ordering is the caller's (typically
//! chronological, from sorted input file names).

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One patient-visit record: the patient's age and the continuity
/// scores computed for the resident and attending physician.
///
/// Scores are continuity-index values, typically in 0–10, but the
/// engine tolerates any finite real.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub age: u32,
    pub resident: f64,
    pub attending: f64,
}

/// Which continuity score an analysis runs over.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    Serialize,
    Deserialize,
)]
pub enum Metric {
    /// The resident physician's continuity score.
    #[display("resident")]
    Resident,
    /// The attending physician's continuity score.
    #[display("attending")]
    Attending,
}

impl Metric {
    /// Both metrics, in reporting order.
    pub const ALL: [Metric; 2] = [Metric::Resident, Metric::Attending];
}

impl Observation {
    /// The value of one metric for this observation.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Resident => self.resident,
            Metric::Attending => self.attending,
        }
    }
}

/// A labeled group of observations compared against the other cohorts.
///
/// The label is an opaque identifier (the original data used year-range
/// tokens like `20180701_20190630`); the engine never parses its
/// structure. Observation order is preserved for reproducibility of
/// derived sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    label: String,
    observations: Vec<Observation>,
}

impl Cohort {
    /// Builds a cohort, validating the ingestion contract: a non-empty
    /// label and at least one observation.
    pub fn new(
        label: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Result<Self, AnalysisError> {
        let label = label.into();
        if label.is_empty() {
            return Err(AnalysisError::Schema {
                detail: "cohort label is empty".to_owned(),
            });
        }
        if observations.is_empty() {
            return Err(AnalysisError::Schema {
                detail: format!("cohort '{label}' has no observations"),
            });
        }
        Ok(Self {
            label,
            observations,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Extracts one metric's values in observation order.
    ///
    /// Every value must be finite, even though ingestion is supposed
    /// to reject incomplete records: a NaN or infinity here means a
    /// record lost its metric upstream, and letting it through would
    /// poison every downstream statistic.
    pub fn metric_values(&self, metric: Metric) -> Result<Vec<f64>, AnalysisError> {
        self.observations
            .iter()
            .enumerate()
            .map(|(row, observation)| {
                let value = observation.metric(metric);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(AnalysisError::Schema {
                        detail: format!(
                            "observation {row} of cohort '{}' has a non-finite {metric} value",
                            self.label
                        ),
                    })
                }
            })
            .collect()
    }
}

/// An ordered collection of cohorts, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortDataset {
    cohorts: Vec<Cohort>,
}

impl CohortDataset {
    /// Builds a dataset, validating that cohort labels are unique.
    pub fn new(cohorts: Vec<Cohort>) -> Result<Self, AnalysisError> {
        for (index, cohort) in cohorts.iter().enumerate() {
            if cohorts[..index].iter().any(|c| c.label == cohort.label) {
                return Err(AnalysisError::Schema {
                    detail: format!("duplicate cohort label '{}'", cohort.label),
                });
            }
        }
        Ok(Self { cohorts })
    }

    #[must_use]
    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cohort> {
        self.cohorts.iter()
    }
}

impl<'a> IntoIterator for &'a CohortDataset {
    type Item = &'a Cohort;
    type IntoIter = std::slice::Iter<'a, Cohort>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(age: u32, resident: f64, attending: f64) -> Observation {
        Observation {
            age,
            resident,
            attending,
        }
    }

    #[test]
    fn test_empty_cohort_rejected() {
        let result = Cohort::new("2019", vec![]);
        assert!(matches!(result, Err(AnalysisError::Schema { .. })));
    }

    #[test]
    fn test_empty_label_rejected() {
        let result = Cohort::new("", vec![observation(30, 1.0, 2.0)]);
        assert!(matches!(result, Err(AnalysisError::Schema { .. })));
    }

    #[test]
    fn test_metric_values_preserve_order() {
        let cohort = Cohort::new(
            "2019",
            vec![
                observation(30, 3.0, 6.0),
                observation(22, 1.0, 4.0),
                observation(41, 2.0, 5.0),
            ],
        )
        .unwrap();
        assert_eq!(cohort.metric_values(Metric::Resident).unwrap(), [3.0, 1.0, 2.0]);
        assert_eq!(cohort.metric_values(Metric::Attending).unwrap(), [6.0, 4.0, 5.0]);
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let cohort = Cohort::new(
            "2019",
            vec![observation(30, 3.0, 6.0), observation(22, f64::NAN, 4.0)],
        )
        .unwrap();
        let error = cohort.metric_values(Metric::Resident).unwrap_err();
        assert!(matches!(error, AnalysisError::Schema { .. }));
        assert!(error.to_string().contains("observation 1"));
        // The other metric is unaffected.
        assert!(cohort.metric_values(Metric::Attending).is_ok());
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let a = Cohort::new("2019", vec![observation(20, 1.0, 1.0)]).unwrap();
        let b = Cohort::new("2019", vec![observation(21, 2.0, 2.0)]).unwrap();
        let result = CohortDataset::new(vec![a, b]);
        assert!(matches!(result, Err(AnalysisError::Schema { .. })));
    }

    #[test]
    fn test_dataset_preserves_cohort_order() {
        let labels = ["2019", "2017", "2018"];
        let cohorts = labels
            .iter()
            .map(|label| Cohort::new(*label, vec![observation(20, 1.0, 1.0)]).unwrap())
            .collect();
        let dataset = CohortDataset::new(cohorts).unwrap();
        let seen: Vec<&str> = dataset.iter().map(Cohort::label).collect();
        assert_eq!(seen, labels);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("resident".parse::<Metric>().unwrap(), Metric::Resident);
        assert_eq!("attending".parse::<Metric>().unwrap(), Metric::Attending);
    }
}
