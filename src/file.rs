use crate::scan::{RunReport, ScanStats};
use crate::gc::ChunkReport;
use serde::Serialize;

#[derive(Serialize, Default)]
pub struct RunSummary {
    pub fastascan_version: String,
    pub file_path: String,
    pub run_date: String,
    pub elapsed: f64,
    pub gc_window: Option<usize>,
    pub selectors: Option<String>,
    pub chunks: u64,
    pub final_window: Option<ChunkReport>,
    pub final_gc_percent: Option<f64>,
    pub query: Option<String>,
    pub occurrences: Option<u64>,
    pub stats: ScanStats,
}

impl RunSummary {
    pub fn from_report(report: RunReport) -> Self {
        RunSummary {
            fastascan_version: crate::cli::VERSION.to_string(),
            run_date: format!("{:?}", chrono::offset::Local::now()),
            chunks: report.chunks,
            final_gc_percent: report.final_window.as_ref().and_then(|w| w.gc_percent()),
            final_window: report.final_window,
            query: report.query,
            occurrences: report.occurrences,
            stats: report.stats,
            ..RunSummary::default()
        }
    }
}
