//! forksum: sum an integer range with one unit of work per split.

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use forksum_lib::{app, config};

fn main() -> Result<()> {
    let config = config::AppConfig::parse_or_exit();

    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if let Some(level) = config.log_level() {
        filter = filter.add_directive(LevelFilter::from_level(level).into());
    }

    // Logs go to stderr: stdout carries result rows, or wire data in unit mode.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    app::run(&config)
}
