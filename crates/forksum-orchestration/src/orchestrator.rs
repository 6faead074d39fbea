//! Core orchestration: timed runs and result analysis.

use std::time::Instant;

use tracing::{debug, info};

use forksum_core::driver::Driver;
use forksum_core::error::{Field, ForkSumError};
use forksum_core::range::UnitRange;

use crate::interfaces::RunReport;

/// Compute `range` once and time it.
pub fn execute_run(driver: &Driver, range: UnitRange) -> Result<RunReport, ForkSumError> {
    let start = Instant::now();
    let outcome = driver.compute(range)?;
    let duration = start.elapsed();
    info!(%range, sum = outcome.sum, units = outcome.count, ?duration, "run complete");
    Ok(RunReport {
        range,
        outcome,
        duration,
    })
}

/// Compute `range` `repeat` times, stopping at the first failure.
pub fn execute_runs(
    driver: &Driver,
    range: UnitRange,
    repeat: usize,
) -> Result<Vec<RunReport>, ForkSumError> {
    (0..repeat)
        .map(|run| {
            debug!(run, %range, "starting run");
            execute_run(driver, range)
        })
        .collect()
}

/// Check a report against the closed-form sum and unit count.
pub fn validate_report(report: &RunReport) -> Result<(), ForkSumError> {
    let expected = report.range.expected_sum();
    if i128::from(report.outcome.sum) != expected {
        return Err(ForkSumError::Mismatch {
            field: Field::Sum,
            actual: report.outcome.sum,
            expected,
        });
    }
    let expected = report.range.expected_units();
    if i128::from(report.outcome.count) != expected {
        return Err(ForkSumError::Mismatch {
            field: Field::Count,
            actual: report.outcome.count,
            expected,
        });
    }
    Ok(())
}

/// Check that every run produced the same result as the first.
pub fn analyze_runs(reports: &[RunReport]) -> Result<(), ForkSumError> {
    let Some(first) = reports.first() else {
        return Ok(());
    };
    for (run, report) in reports.iter().enumerate().skip(1) {
        if report.outcome != first.outcome {
            return Err(ForkSumError::Inconsistent { run });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use forksum_core::outcome::ForkSum;
    use forksum_core::spawner::ThreadSpawner;

    use super::*;

    fn report(start: i64, end: i64, sum: i64, count: i64) -> RunReport {
        RunReport {
            range: UnitRange::new(start, end),
            outcome: ForkSum { sum, count },
            duration: Duration::from_millis(1),
        }
    }

    fn driver() -> Driver {
        Driver::new(Arc::new(ThreadSpawner::new()))
    }

    #[test]
    fn execute_single_run() {
        let report = execute_run(&driver(), UnitRange::new(1, 100)).unwrap();
        assert_eq!(report.outcome, ForkSum { sum: 5050, count: 199 });
        assert!(validate_report(&report).is_ok());
    }

    #[test]
    fn execute_repeated_runs() {
        let reports = execute_runs(&driver(), UnitRange::new(-3, 3), 3).unwrap();
        assert_eq!(reports.len(), 3);
        assert!(analyze_runs(&reports).is_ok());
        assert!(reports.iter().all(|r| r.outcome.sum == 0));
    }

    #[test]
    fn validate_wrong_sum() {
        assert!(matches!(
            validate_report(&report(1, 10, 54, 19)),
            Err(ForkSumError::Mismatch {
                field: Field::Sum,
                actual: 54,
                expected: 55,
            })
        ));
    }

    #[test]
    fn validate_wrong_count() {
        assert!(matches!(
            validate_report(&report(0, 3, 6, 6)),
            Err(ForkSumError::Mismatch {
                field: Field::Count,
                expected: 7,
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_inverted_fallback() {
        // The driver yields {5, 1} for [5, 4]; the closed form says 0.
        let report = execute_run(&driver(), UnitRange::new(5, 4)).unwrap();
        assert_eq!(report.outcome, ForkSum { sum: 5, count: 1 });
        assert!(matches!(
            validate_report(&report),
            Err(ForkSumError::Mismatch {
                field: Field::Sum,
                expected: 0,
                ..
            })
        ));
    }

    #[test]
    fn validate_single_point() {
        assert!(validate_report(&report(5, 5, 5, 1)).is_ok());
    }

    #[test]
    fn analyze_empty_and_single() {
        assert!(analyze_runs(&[]).is_ok());
        assert!(analyze_runs(&[report(1, 10, 55, 19)]).is_ok());
    }

    #[test]
    fn analyze_third_run_differs() {
        let reports = vec![
            report(1, 10, 55, 19),
            report(1, 10, 55, 19),
            report(1, 10, 56, 19),
        ];
        assert!(matches!(
            analyze_runs(&reports),
            Err(ForkSumError::Inconsistent { run: 2 })
        ));
    }

    #[test]
    fn analyze_ignores_duration() {
        let mut slow = report(1, 10, 55, 19);
        slow.duration = Duration::from_secs(3);
        assert!(analyze_runs(&[report(1, 10, 55, 19), slow]).is_ok());
    }
}
