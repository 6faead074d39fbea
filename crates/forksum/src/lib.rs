//! forksum library: application logic for the fork-join range summer.

pub mod app;
pub mod config;
