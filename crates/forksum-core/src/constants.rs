//! Constants for unit creation and process exit codes.

/// Stack size for thread units.
///
/// A unit only recurses in place below the cutoff, so its depth is
/// logarithmic in the cutoff.
pub const UNIT_STACK_SIZE: usize = 256 * 1024;

/// Default inline cutoff (0 = every split spawns two units).
pub const DEFAULT_CUTOFF: u64 = 0;

/// Log every Nth consecutive transient creation failure for one unit.
pub const RETRY_LOG_INTERVAL: u64 = 10_000;

/// Exit codes.
pub mod exit_codes {
    /// Any fatal error: bad arguments, unit failure, validation mismatch.
    pub const ERROR_GENERIC: i32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_size_page_aligned() {
        assert_eq!(UNIT_STACK_SIZE % 4096, 0);
    }
}
