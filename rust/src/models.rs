//! Core data types for the sprint planner.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Note: BTreeMap keeps serialized output stable across runs

/// Sprint length used when a request does not specify one.
pub const DEFAULT_SPRINT_LENGTH_DAYS: i32 = 7;
/// Longest sprint a request may ask for.
pub const MAX_SPRINT_LENGTH_DAYS: i32 = 366;

fn default_sprint_length() -> i32 {
    DEFAULT_SPRINT_LENGTH_DAYS
}

/// A schedulable unit of study content, as supplied by the caller.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    /// Self-assessed confidence, 1 (weak) to 5 (strong)
    #[pyo3(get, set)]
    #[serde(default)]
    pub confidence: Option<u8>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub prerequisite_ids: Vec<String>,
}

#[pymethods]
impl Topic {
    #[new]
    #[pyo3(signature = (id, name, confidence=None, prerequisite_ids=None))]
    fn new(
        id: String,
        name: String,
        confidence: Option<u8>,
        prerequisite_ids: Option<Vec<String>>,
    ) -> Self {
        Self {
            id,
            name,
            confidence,
            prerequisite_ids: prerequisite_ids.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Topic(id={:?}, confidence={:?}, prereqs={})",
            self.id,
            self.confidence,
            self.prerequisite_ids.len()
        )
    }
}

/// A subject and the topics it is broken into.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    #[serde(default)]
    pub credit_weight: Option<f64>,
    /// Fallback confidence for topics that carry none
    #[pyo3(get, set)]
    #[serde(default)]
    pub baseline_confidence: Option<u8>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[pymethods]
impl Subject {
    #[new]
    #[pyo3(signature = (name, topics, credit_weight=None, baseline_confidence=None))]
    fn new(
        name: String,
        topics: Vec<Topic>,
        credit_weight: Option<f64>,
        baseline_confidence: Option<u8>,
    ) -> Self {
        Self {
            name,
            credit_weight,
            baseline_confidence,
            topics,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Subject(name={:?}, credit_weight={:?}, topics={})",
            self.name,
            self.credit_weight,
            self.topics.len()
        )
    }
}

/// Hours available for study, by date or by weekday/weekend bucket.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    /// Hours on Monday through Friday
    #[pyo3(get, set)]
    pub weekday_hours: Option<f64>,
    /// Hours on Saturday and Sunday
    #[pyo3(get, set)]
    pub weekend_hours: Option<f64>,
    /// Exact-date overrides, taking precedence over the buckets
    #[pyo3(get, set)]
    pub date_overrides: BTreeMap<NaiveDate, f64>,
}

#[pymethods]
impl Availability {
    #[new]
    #[pyo3(signature = (weekday_hours=None, weekend_hours=None, date_overrides=None))]
    fn new(
        weekday_hours: Option<f64>,
        weekend_hours: Option<f64>,
        date_overrides: Option<BTreeMap<NaiveDate, f64>>,
    ) -> Self {
        Self {
            weekday_hours,
            weekend_hours,
            date_overrides: date_overrides.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Availability(weekday_hours={:?}, weekend_hours={:?}, overrides={})",
            self.weekday_hours,
            self.weekend_hours,
            self.date_overrides.len()
        )
    }
}

/// Everything needed to compute one sprint.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningRequest {
    #[pyo3(get, set)]
    pub subjects: Vec<Subject>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub availability: Availability,
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    #[pyo3(get, set)]
    #[serde(default = "default_sprint_length")]
    pub sprint_length_days: i32,
    /// Preferred time of day ("Morning", "Night", ...), quoted in justifications
    #[pyo3(get, set)]
    #[serde(default)]
    pub preferred_time: Option<String>,
}

#[pymethods]
impl PlanningRequest {
    #[new]
    #[pyo3(signature = (
        subjects,
        availability,
        start_date,
        sprint_length_days=DEFAULT_SPRINT_LENGTH_DAYS,
        preferred_time=None
    ))]
    fn new(
        subjects: Vec<Subject>,
        availability: Availability,
        start_date: NaiveDate,
        sprint_length_days: i32,
        preferred_time: Option<String>,
    ) -> Self {
        Self {
            subjects,
            availability,
            start_date,
            sprint_length_days,
            preferred_time,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlanningRequest(subjects={}, start_date={}, sprint_length_days={})",
            self.subjects.len(),
            self.start_date,
            self.sprint_length_days
        )
    }
}

/// A topic after weighting, carrying its parent subject data and hour budget.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetedTopic {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub name: String,
    /// The topic's own confidence, if it had one
    #[pyo3(get)]
    pub confidence: Option<u8>,
    /// Topic confidence, else subject baseline, else the policy default
    #[pyo3(get)]
    pub effective_confidence: u8,
    #[pyo3(get)]
    pub prerequisite_ids: Vec<String>,
    #[pyo3(get)]
    pub parent_subject_name: String,
    #[pyo3(get)]
    pub parent_subject_credit_weight: f64,
    #[pyo3(get)]
    pub weight: f64,
    /// Hour budget, a multiple of 0.5
    #[pyo3(get)]
    pub allocated_hours: f64,
}

#[pymethods]
impl BudgetedTopic {
    fn __repr__(&self) -> String {
        format!(
            "BudgetedTopic(id={:?}, weight={:.1}, allocated_hours={})",
            self.id, self.weight, self.allocated_hours
        )
    }
}

/// Cognitive-load classification of a scheduled chunk.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FocusLevel {
    Normal,
    #[serde(rename = "High Focus")]
    HighFocus,
}

impl fmt::Display for FocusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusLevel::Normal => write!(f, "Normal"),
            FocusLevel::HighFocus => write!(f, "High Focus"),
        }
    }
}

#[pymethods]
impl FocusLevel {
    fn __str__(&self) -> String {
        self.to_string()
    }
}

/// One block of study time on a sprint day.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[pyo3(get)]
    pub topic_id: String,
    #[pyo3(get)]
    pub topic_name: String,
    #[pyo3(get)]
    pub subject_name: String,
    #[pyo3(get)]
    pub duration_hours: f64,
    #[pyo3(get)]
    pub focus_level: FocusLevel,
    #[pyo3(get)]
    pub justification: String,
}

#[pymethods]
impl ScheduleItem {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleItem(topic_id={:?}, duration_hours={}, focus_level={})",
            self.topic_id, self.duration_hours, self.focus_level
        )
    }
}

/// A single day of the sprint with its capacity and placed items.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintDay {
    #[pyo3(get)]
    pub date: NaiveDate,
    #[pyo3(get)]
    pub weekday_name: String,
    #[pyo3(get)]
    pub hours_available: f64,
    /// Invariant: never exceeds hours_available
    #[pyo3(get)]
    pub hours_scheduled: f64,
    #[pyo3(get)]
    pub items: Vec<ScheduleItem>,
}

impl SprintDay {
    /// Hours still free on this day.
    pub fn free_hours(&self) -> f64 {
        self.hours_available - self.hours_scheduled
    }
}

#[pymethods]
impl SprintDay {
    fn __repr__(&self) -> String {
        format!(
            "SprintDay(date={}, available={}, scheduled={}, items={})",
            self.date,
            self.hours_available,
            self.hours_scheduled,
            self.items.len()
        )
    }
}

/// Hours of a topic that did not fit before the sprint ran out of days.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Underscheduled {
    #[pyo3(get)]
    pub topic_id: String,
    #[pyo3(get)]
    pub shortfall_hours: f64,
}

#[pymethods]
impl Underscheduled {
    fn __repr__(&self) -> String {
        format!(
            "Underscheduled(topic_id={:?}, shortfall_hours={})",
            self.topic_id, self.shortfall_hours
        )
    }
}

/// Result of one planning run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPlan {
    #[pyo3(get)]
    pub days: Vec<SprintDay>,
    /// Budgeted topics in the order they were scheduled
    #[pyo3(get)]
    pub topics: Vec<BudgetedTopic>,
    #[pyo3(get)]
    pub underscheduled: Vec<Underscheduled>,
    #[pyo3(get)]
    pub plan_metadata: BTreeMap<String, String>,
}

impl SprintPlan {
    /// Total hours emitted for a topic across every day.
    pub fn scheduled_hours_for(&self, topic_id: &str) -> f64 {
        self.days
            .iter()
            .flat_map(|day| day.items.iter())
            .filter(|item| item.topic_id == topic_id)
            .map(|item| item.duration_hours)
            .sum()
    }
}

#[pymethods]
impl SprintPlan {
    #[pyo3(name = "scheduled_hours_for")]
    fn py_scheduled_hours_for(&self, topic_id: &str) -> f64 {
        self.scheduled_hours_for(topic_id)
    }

    fn __repr__(&self) -> String {
        format!(
            "SprintPlan(days={}, topics={}, underscheduled={})",
            self.days.len(),
            self.topics.len(),
            self.underscheduled.len()
        )
    }
}
