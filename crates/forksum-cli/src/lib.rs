//! # forksum-cli
//!
//! Result rows, presenters, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use presenter::{CsvPresenter, JsonPresenter};
