//! Application entry point and dispatch.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use forksum_cli::output::write_to_file;
use forksum_cli::presenter::{CsvPresenter, JsonPresenter};
use forksum_core::driver::Driver;
use forksum_core::range::UnitRange;
use forksum_core::spawner::{ProcessSpawner, Spawner, ThreadSpawner};
use forksum_core::wire;
use forksum_orchestration::interfaces::ResultPresenter;
use forksum_orchestration::orchestrator::{analyze_runs, execute_runs, validate_report};

use crate::config::{AppConfig, Backend, OutputFormat};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        forksum_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(());
    }

    let range = config
        .range()
        .context("need 2 parameters: start and end")?;
    let driver = build_driver(config)?;
    debug!(?driver, %range, "driver ready");

    if config.unit {
        return run_unit(&driver, range);
    }
    run_cli(config, &driver, range)
}

/// Build the driver for the configured backend.
pub fn build_driver(config: &AppConfig) -> Result<Driver> {
    let opts = config.options();
    let spawner: Arc<dyn Spawner> = match config.backend {
        Backend::Thread => Arc::new(ThreadSpawner::with_stack_size(opts.stack_size)),
        Backend::Process => {
            let exe = std::env::current_exe()
                .context("failed to locate the forksum executable for process units")?;
            Arc::new(
                ProcessSpawner::new(exe)
                    .arg("--unit")
                    .arg("--backend")
                    .arg("process")
                    .arg("--cutoff")
                    .arg(opts.cutoff.to_string()),
            )
        }
    };
    Ok(Driver::with_options(spawner, &opts))
}

/// Process-unit mode: the result lines are the only thing on stdout.
fn run_unit(driver: &Driver, range: UnitRange) -> Result<()> {
    let result = driver.compute(range)?;
    wire::encode(&result, &mut io::stdout().lock())?;
    Ok(())
}

fn run_cli(config: &AppConfig, driver: &Driver, range: UnitRange) -> Result<()> {
    let reports = execute_runs(driver, range, config.repeat as usize)?;

    analyze_runs(&reports)?;
    for report in &reports {
        validate_report(report)?;
    }

    let presenter: Box<dyn ResultPresenter> = match config.format {
        OutputFormat::Csv => Box::new(CsvPresenter::new(config.header)),
        OutputFormat::Json => Box::new(JsonPresenter),
    };
    let mut rows = Vec::new();
    presenter.begin(&mut rows)?;
    for report in &reports {
        presenter.present(report, &mut rows)?;
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(&rows)?;
    stdout.flush()?;

    // Write to file if requested
    if let Some(ref path) = config.output {
        write_to_file(path, &rows).with_context(|| format!("failed to write {path}"))?;
    }

    Ok(())
}
