//! Cohort ingestion from a directory of CSV files.
//!
//! One CSV file per cohort, named so that lexicographic order is
//! chronological (the collected data uses `YYYYMMDD_YYYYMMDD.csv`
//! spans); the file stem becomes the cohort label. The header row
//! locates the age and score columns by name, so column order in the
//! exports does not matter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use mmci_analysis::dataset::{Cohort, CohortDataset, Observation};

/// Header names of the columns ingestion reads.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub age: String,
    pub resident: String,
    pub attending: String,
}

/// Reads every CSV file in `dir` into a dataset, in sorted file-name
/// order.
pub fn read_cohort_dir(dir: &Path, columns: &ColumnNames) -> anyhow::Result<CohortDataset> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .with_context(|| format!("Failed to list input directory: {}", dir.display()))?;
    paths.retain(|path| {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    });
    paths.sort();
    if paths.is_empty() {
        bail!("no CSV files found in {}", dir.display());
    }

    let cohorts = paths
        .iter()
        .map(|path| read_cohort_file(path, columns))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CohortDataset::new(cohorts)?)
}

/// Reads one cohort file: header discovery, then one observation per
/// data row. A malformed row is a hard error naming the file and line.
fn read_cohort_file(path: &Path, columns: &ColumnNames) -> anyhow::Result<Cohort> {
    let label = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Input file name is not valid UTF-8: {}", path.display()))?
        .to_owned();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cohort file: {}", path.display()))?;

    let mut lines = contents.lines().enumerate();
    let (_, header) = lines
        .next()
        .with_context(|| format!("Cohort file is empty: {}", path.display()))?;
    let header = split_row(header);
    let age_index = find_column(&header, &columns.age, path)?;
    let resident_index = find_column(&header, &columns.resident, path)?;
    let attending_index = find_column(&header, &columns.attending, path)?;

    let mut observations = vec![];
    for (line_index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line);
        let field = |column_index: usize, name: &str| {
            fields.get(column_index).copied().with_context(|| {
                format!(
                    "Row at line {} of {} has no '{name}' field",
                    line_index + 1,
                    path.display()
                )
            })
        };
        let parse_context = |name: &str| {
            format!(
                "Failed to parse '{name}' at line {} of {}",
                line_index + 1,
                path.display()
            )
        };

        let age = field(age_index, &columns.age)?
            .parse::<u32>()
            .with_context(|| parse_context(&columns.age))?;
        let resident = field(resident_index, &columns.resident)?
            .parse::<f64>()
            .with_context(|| parse_context(&columns.resident))?;
        let attending = field(attending_index, &columns.attending)?
            .parse::<f64>()
            .with_context(|| parse_context(&columns.attending))?;
        observations.push(Observation {
            age,
            resident,
            attending,
        });
    }

    Ok(Cohort::new(label, observations)?)
}

fn split_row(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r').split(',').map(str::trim).collect()
}

fn find_column(header: &[&str], name: &str, path: &Path) -> anyhow::Result<usize> {
    header
        .iter()
        .position(|cell| cell.eq_ignore_ascii_case(name))
        .with_context(|| format!("Column '{}' not found in {}", name, path.display()))
}
