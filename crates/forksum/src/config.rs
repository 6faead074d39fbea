//! Application configuration from CLI flags and environment.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use forksum_core::constants::exit_codes;
use forksum_core::options::Options;
use forksum_core::range::UnitRange;

/// How each unit of work is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One OS thread per unit, with an in-memory channel.
    Thread,
    /// One child process per unit, with a stdout pipe.
    Process,
}

/// Format of the result rows on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `start,end,total_sum,total_forks,duration_seconds,forks_per_second`
    Csv,
    /// One JSON object per line.
    Json,
}

/// Sum an integer range by recursive fork-join, one unit of work per split.
#[derive(Parser, Debug)]
#[command(name = "forksum", version, about, allow_negative_numbers = true)]
pub struct AppConfig {
    /// First integer of the range.
    #[arg(required_unless_present = "completion")]
    pub start: Option<i64>,

    /// Last integer of the range (inclusive).
    #[arg(required_unless_present = "completion")]
    pub end: Option<i64>,

    /// Unit backend.
    #[arg(long, value_enum, default_value = "thread", env = "FORKSUM_BACKEND")]
    pub backend: Backend,

    /// Compute ranges of at most this many integers inside the owning unit
    /// instead of spawning (0 = always spawn).
    #[arg(long, default_value = "0", env = "FORKSUM_CUTOFF")]
    pub cutoff: u64,

    /// Stack size in bytes for thread units (0 = 256 KiB).
    #[arg(long, default_value = "0", env = "FORKSUM_STACK_SIZE")]
    pub stack_size: usize,

    /// Number of times to run the computation.
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Output format.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Print the CSV header before the first row.
    #[arg(long)]
    pub header: bool,

    /// Also write the rows to this file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verbose logging on stderr (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Run as a process unit: compute the range and write the result lines
    /// to stdout.
    #[arg(long, hide = true)]
    pub unit: bool,
}

impl AppConfig {
    /// Parse CLI arguments, exiting with status 1 on invalid arguments.
    ///
    /// `--help` and `--version` still exit with status 0.
    #[must_use]
    pub fn parse_or_exit() -> Self {
        match <Self as Parser>::try_parse() {
            Ok(config) => config,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.exit()
            }
            Err(err) => {
                let _ = err.print();
                std::process::exit(exit_codes::ERROR_GENERIC)
            }
        }
    }

    /// The range to sum, when both bounds were given.
    #[must_use]
    pub fn range(&self) -> Option<UnitRange> {
        Some(UnitRange::new(self.start?, self.end?))
    }

    /// Driver options.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            cutoff: self.cutoff,
            stack_size: self.stack_size,
        }
        .normalize()
    }

    /// Log level requested with `-v`, if any. Without `-v` the level comes
    /// from `RUST_LOG`, falling back to WARN.
    #[must_use]
    pub fn log_level(&self) -> Option<tracing::Level> {
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::INFO),
            2 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        }
    }
}
