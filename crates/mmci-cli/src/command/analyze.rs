use std::path::PathBuf;

use mmci_analysis::{
    dataset::Metric,
    dispersion::VarianceConvention,
    report::{AnalysisConfig, AnalysisReport},
    subgroup::DEFAULT_AGE_THRESHOLD,
};

use crate::{
    ingest::{self, ColumnNames},
    output::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Directory containing one CSV file per cohort, named so that
    /// lexicographic order is chronological (e.g. YYYYMMDD_YYYYMMDD.csv)
    input_dir: PathBuf,
    /// Output file path for the JSON reports (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also write the ANOVA summary lines to this text file
    #[arg(long)]
    anova_summary: Option<PathBuf>,
    /// Age below which an observation counts as "younger"
    #[arg(long, default_value_t = DEFAULT_AGE_THRESHOLD)]
    age_threshold: u32,
    /// Variance estimator applied to every cohort: "population"
    /// (divide by n) or "sample" (divide by n - 1)
    #[arg(long, default_value_t)]
    variance: VarianceConvention,
    /// Header name of the age column
    #[arg(long, default_value = "Age")]
    age_column: String,
    /// Header name of the resident score column
    #[arg(long, default_value = "MMCI resident")]
    resident_column: String,
    /// Header name of the attending score column
    #[arg(long, default_value = "MMCI attending")]
    attending_column: String,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let columns = ColumnNames {
        age: arg.age_column.clone(),
        resident: arg.resident_column.clone(),
        attending: arg.attending_column.clone(),
    };

    eprintln!("Reading cohort files from {}...", arg.input_dir.display());
    let dataset = ingest::read_cohort_dir(&arg.input_dir, &columns)?;
    eprintln!("Loaded {} cohorts", dataset.len());

    let config = AnalysisConfig {
        age_threshold: arg.age_threshold,
        variance_convention: arg.variance,
    };
    let reports: Vec<AnalysisReport> = Metric::ALL
        .iter()
        .map(|&metric| AnalysisReport::assemble(&dataset, metric, config))
        .collect();

    let mut summary_lines = vec![];
    for report in &reports {
        for failure in &report.failures {
            eprintln!("warning: {failure}");
        }
        if let Some(line) = report.anova_summary_line() {
            eprintln!("{line}");
            summary_lines.push(line);
        } else {
            eprintln!(
                "One-way ANOVA for {} continuity scores: skipped, see failures in the report",
                report.metric
            );
        }
    }

    if let Some(path) = &arg.anova_summary {
        Output::save_lines(&summary_lines, path)?;
        eprintln!("Wrote ANOVA summary to {}", path.display());
    }

    Output::save_json(&reports, arg.output.clone())?;
    Ok(())
}
