//! Logging macros for the scheduling engine with verbosity level control.
//!
//! Logging is free when disabled (verbosity=0): each call site reduces to one
//! integer compare. Levels:
//! - 0: SILENT (nothing)
//! - 1: CHANGES (date assignments, cycle aborts)
//! - 2: CHECKS (skipped prerequisites, dangling edges, fallback tasks)
//! - 3: DEBUG (topological order, graph shape)

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
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_silent() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "scheduled {}", "t1");
        log_checks!(verbosity, "skipped {}", "t2");
        log_debug!(verbosity, "order {:?}", ["t1", "t2"]);
    }
}
