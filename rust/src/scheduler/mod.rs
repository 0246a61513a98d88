//! Greedy sprint scheduler.
//!
//! Walks budgeted topics in prerequisite order and packs their hours into the
//! sprint days, splitting a topic across days when one day cannot hold it.

mod annotation;
mod core;
mod cursor;

pub use annotation::{annotate, Annotation};
pub use core::{ScheduleOutcome, SprintScheduler, HOURS_EPSILON};
pub use cursor::DayCursor;
