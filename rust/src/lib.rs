//! Study sprint planner.
//!
//! Turns subjects, topics and weekly availability into a day-by-day study
//! schedule for a short sprint, with focus annotations on every block.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod adapter;
pub mod calendar;
mod config;
pub mod interner;
pub mod logging;
mod models;
pub mod planner;
pub mod prerequisites;
pub mod scheduler;
pub mod validation;
pub mod weights;

pub use adapter::{request_from_profile, StudentProfile, SubjectProfile, WeeklyAvailability};
pub use config::{PlannerConfig, WeightPolicy};
pub use models::{
    Availability, BudgetedTopic, FocusLevel, PlanningRequest, ScheduleItem, SprintDay,
    SprintPlan, Subject, Topic, Underscheduled, DEFAULT_SPRINT_LENGTH_DAYS,
    MAX_SPRINT_LENGTH_DAYS,
};
pub use planner::{plan_from_profile, plan_sprint, plan_sprint_json, PlanningError};
pub use prerequisites::{sort_by_prerequisites, PrerequisiteOrder};
pub use scheduler::{ScheduleOutcome, SprintScheduler};
pub use validation::ValidationError;

fn to_py_err(err: PlanningError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Compute a sprint schedule.
///
/// # Arguments
/// * `request` - Subjects, availability, start date and sprint length
/// * `config` - Planner configuration (defaults if omitted)
///
/// # Returns
/// * SprintPlan with the filled days, budgeted topics and any underscheduled hours
///
/// # Raises
/// * ValueError if the request is malformed (duplicate/missing ids, negative hours,
///   sprint length outside 1..=366, overflowing weights) or the configuration is invalid
#[pyfunction]
#[pyo3(name = "plan_sprint", signature = (request, config=None))]
fn py_plan_sprint(
    request: PlanningRequest,
    config: Option<PlannerConfig>,
) -> PyResult<SprintPlan> {
    plan_sprint(&request, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Compute a sprint schedule from a JSON request, returning JSON.
///
/// # Raises
/// * ValueError if the JSON or the request it describes is malformed
#[pyfunction]
#[pyo3(name = "plan_sprint_json", signature = (request_json, config=None))]
fn py_plan_sprint_json(request_json: &str, config: Option<PlannerConfig>) -> PyResult<String> {
    plan_sprint_json(request_json, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Compute a default-length sprint directly from a student profile.
///
/// Weak areas become confidence-2 topics, strong areas confidence-5 topics.
#[pyfunction]
#[pyo3(name = "plan_from_profile", signature = (profile, start_date, config=None))]
fn py_plan_from_profile(
    profile: StudentProfile,
    start_date: NaiveDate,
    config: Option<PlannerConfig>,
) -> PyResult<SprintPlan> {
    plan_from_profile(&profile, start_date, &config.unwrap_or_default()).map_err(to_py_err)
}

/// The study_sprint.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Input types
    m.add_class::<Topic>()?;
    m.add_class::<Subject>()?;
    m.add_class::<Availability>()?;
    m.add_class::<PlanningRequest>()?;
    m.add_class::<SubjectProfile>()?;
    m.add_class::<WeeklyAvailability>()?;
    m.add_class::<StudentProfile>()?;

    // Output types
    m.add_class::<BudgetedTopic>()?;
    m.add_class::<FocusLevel>()?;
    m.add_class::<ScheduleItem>()?;
    m.add_class::<SprintDay>()?;
    m.add_class::<Underscheduled>()?;
    m.add_class::<SprintPlan>()?;

    // Config types
    m.add_class::<PlannerConfig>()?;
    m.add_class::<WeightPolicy>()?;

    // Planning
    m.add_function(wrap_pyfunction!(py_plan_sprint, m)?)?;
    m.add_function(wrap_pyfunction!(py_plan_sprint_json, m)?)?;
    m.add_function(wrap_pyfunction!(py_plan_from_profile, m)?)?;

    Ok(())
}
