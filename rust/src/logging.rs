//! Logging macros for the optimization pipeline with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0). Output goes to stderr.
//! - 0: SILENT (nothing)
//! - 1: CHANGES (stage results: counts kept per stage, final totals)
//! - 2: CHECKS (per-task decisions: skipped overlaps, knapsack picks)
//! - 3: DEBUG (algorithm internals such as DP table dimensions)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_macros_do_not_panic() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "selected {}", 1);
        log_checks!(verbosity, "skipped {}", 2);
        log_debug!(verbosity, "table {}x{}", 3, 4);
    }
}
