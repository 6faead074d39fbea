//! Driver options.

use crate::constants::{DEFAULT_CUTOFF, UNIT_STACK_SIZE};

/// Options for a fork-sum computation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Ranges with at most this many integers are computed inline by the
    /// unit that owns them (0 = always spawn).
    pub cutoff: u64,
    /// Stack size in bytes for thread units.
    pub stack_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            stack_size: UNIT_STACK_SIZE,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.stack_size == 0 {
            self.stack_size = UNIT_STACK_SIZE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spawns_everything() {
        let opts = Options::default();
        assert_eq!(opts.cutoff, 0);
        assert_eq!(opts.stack_size, UNIT_STACK_SIZE);
    }

    #[test]
    fn normalize_fills_zero_stack() {
        let opts = Options {
            cutoff: 8,
            stack_size: 0,
        }
        .normalize();
        assert_eq!(opts.stack_size, UNIT_STACK_SIZE);
        assert_eq!(opts.cutoff, 8);
    }
}
