//! Logging macros for the planner with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Levels:
//! - 0: SILENT (nothing is printed)
//! - 1: PLACEMENTS (chunks placed on days, underscheduled topics)
//! - 2: DECISIONS (per-topic allocations, skipped days, cycle fallback)
//! - 3: DEBUG (cursor movement and prerequisite graph internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_PLACEMENTS: u8 = 1;
pub const VERBOSITY_DECISIONS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at PLACEMENTS level (verbosity >= 1).
///
/// Used for: schedule items emitted, hours dropped at the end of the sprint.
#[macro_export]
macro_rules! log_placements {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PLACEMENTS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DECISIONS level (verbosity >= 2).
///
/// Used for: hour budgets, full-day skips, topics appended by the cycle fallback.
#[macro_export]
macro_rules! log_decisions {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DECISIONS {
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
