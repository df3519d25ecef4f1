use crate::config::RunConfig;
use crate::file::RunSummary;
use crate::scan::RunReport;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Logs the statistics of a finished scan.
pub fn log_stats(report: &RunReport, elapsed: f64) {
    let s = &report.stats;
    info!(
        "Stats: {} records, {} selected, {} sequence lines, {} bases, {:.1}s runtime",
        s.headers, s.selected_records, s.body_lines, s.bases, elapsed
    );
}

/// Builds the JSON summary of a run.
///
/// # Errors
///
/// Returns an error if the input path cannot be resolved to an absolute path.
pub fn summarize(config: &RunConfig, report: RunReport, elapsed: f64) -> Result<RunSummary> {
    Ok(RunSummary {
        file_path: std::fs::canonicalize(&config.input)
            .with_context(|| format!("Unable to resolve {}", config.input.display()))?
            .display()
            .to_string(),
        elapsed,
        gc_window: config.gc_window,
        selectors: config.selectors.as_ref().map(|s| s.to_string()),
        ..RunSummary::from_report(report)
    })
}

/// Writes the summary as pretty-printed JSON to `output`.
pub fn write_summary(output: &Path, summary: &RunSummary) -> Result<()> {
    info!("Writing summary to {}", output.display());

    let mut file = std::fs::File::create(output)
        .with_context(|| format!("Unable to create summary file {}", output.display()))?;
    serde_json::to_writer_pretty(&mut file, summary).context("Could not serialize summary")?;
    writeln!(file)?;

    Ok(())
}
