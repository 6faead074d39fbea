//! Presenters for run reports.

use std::io::{self, Write};

use forksum_orchestration::interfaces::{ResultPresenter, RunReport};

use crate::output::{format_csv_row, format_json_row, CSV_HEADER};

/// Writes one CSV row per run.
pub struct CsvPresenter {
    header: bool,
}

impl CsvPresenter {
    #[must_use]
    pub fn new(header: bool) -> Self {
        Self { header }
    }
}

impl ResultPresenter for CsvPresenter {
    fn begin(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.header {
            writeln!(out, "{CSV_HEADER}")?;
        }
        Ok(())
    }

    fn present(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", format_csv_row(report))
    }
}

/// Writes one JSON object per run (JSON Lines).
pub struct JsonPresenter;

impl ResultPresenter for JsonPresenter {
    fn present(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        let row = format_json_row(report).map_err(io::Error::other)?;
        writeln!(out, "{row}")
    }
}
