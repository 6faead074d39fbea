//! Orchestration interfaces.

use std::io::{self, Write};
use std::time::Duration;

use forksum_core::outcome::ForkSum;
use forksum_core::range::UnitRange;

/// Trait for presenting run reports.
pub trait ResultPresenter: Send + Sync {
    /// Write anything that precedes the first report.
    fn begin(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Write one run report.
    fn present(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()>;
}

/// Result of one timed computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    /// Range that was summed.
    pub range: UnitRange,
    /// Root result.
    pub outcome: ForkSum,
    /// Wall-clock time of the computation.
    pub duration: Duration,
}

impl RunReport {
    /// Units created per second of wall-clock time.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn units_per_second(&self) -> f64 {
        self.outcome.count as f64 / self.duration.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(count: i64, duration: Duration) -> RunReport {
        RunReport {
            range: UnitRange::new(1, 100),
            outcome: ForkSum { sum: 5050, count },
            duration,
        }
    }

    #[test]
    fn throughput() {
        let r = report(199, Duration::from_millis(500));
        assert!((r.units_per_second() - 398.0).abs() < 1e-9);
    }

    #[test]
    fn throughput_zero_duration_is_infinite() {
        let r = report(1, Duration::ZERO);
        assert!(r.units_per_second().is_infinite());
    }

    #[test]
    fn default_begin_writes_nothing() {
        struct Silent;
        impl ResultPresenter for Silent {
            fn present(&self, _report: &RunReport, _out: &mut dyn Write) -> io::Result<()> {
                Ok(())
            }
        }
        let mut buf = Vec::new();
        Silent.begin(&mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
