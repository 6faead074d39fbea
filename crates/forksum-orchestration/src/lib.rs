//! # forksum-orchestration
//!
//! Timed execution, closed-form validation, and run-to-run consistency.

pub mod interfaces;
pub mod orchestrator;

pub use interfaces::{ResultPresenter, RunReport};
pub use orchestrator::{analyze_runs, execute_run, execute_runs, validate_report};
