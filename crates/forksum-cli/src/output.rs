//! Result row formatting.

use std::io::{self, Write};

use serde::Serialize;

use forksum_core::range::UnitRange;
use forksum_orchestration::interfaces::RunReport;

/// Column names of a CSV row.
pub const CSV_HEADER: &str =
    "start,end,total_sum,total_forks,duration_seconds,forks_per_second";

/// Format a report as
/// `start,end,total_sum,total_forks,duration_seconds,forks_per_second`
/// with 6 decimals of seconds and 2 decimals of throughput.
#[must_use]
pub fn format_csv_row(report: &RunReport) -> String {
    format!(
        "{},{},{},{},{:.6},{:.2}",
        report.range.start,
        report.range.end,
        report.outcome.sum,
        report.outcome.count,
        report.duration.as_secs_f64(),
        report.units_per_second(),
    )
}

/// A report as a JSON object, with the CSV column names.
#[derive(Debug, Serialize)]
pub struct JsonRow {
    #[serde(flatten)]
    pub range: UnitRange,
    pub total_sum: i64,
    pub total_forks: i64,
    pub duration_seconds: f64,
    pub forks_per_second: f64,
}

impl From<&RunReport> for JsonRow {
    fn from(report: &RunReport) -> Self {
        Self {
            range: report.range,
            total_sum: report.outcome.sum,
            total_forks: report.outcome.count,
            duration_seconds: report.duration.as_secs_f64(),
            forks_per_second: report.units_per_second(),
        }
    }
}

/// Format a report as a single-line JSON object.
///
/// # Errors
///
/// Returns a serialization error if the row cannot be encoded.
pub fn format_json_row(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string(&JsonRow::from(report))
}

/// Write rows to a file, one per line.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &str, rows: &[u8]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(rows)?;
    Ok(())
}
