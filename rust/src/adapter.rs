//! Conversion of a raw student profile into planner input.
//!
//! Profiles list free-text weak and strong areas per subject. Each area becomes
//! its own topic with a fixed confidence; a subject without any areas becomes a
//! single "core concepts" topic carrying the subject's own confidence.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{
    Availability, PlanningRequest, Subject, Topic, DEFAULT_SPRINT_LENGTH_DAYS,
};

/// Confidence assigned to topics created from weak areas.
pub const WEAK_AREA_CONFIDENCE: u8 = 2;
/// Confidence assigned to topics created from strong areas.
pub const STRONG_AREA_CONFIDENCE: u8 = 5;

/// A subject as entered in a student profile.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProfile {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub credits: f64,
    /// Overall confidence in the subject, 1-5
    #[pyo3(get, set)]
    pub confidence_level: u8,
    #[pyo3(get, set)]
    #[serde(default)]
    pub weak_areas: Vec<String>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub strong_areas: Vec<String>,
}

#[pymethods]
impl SubjectProfile {
    #[new]
    #[pyo3(signature = (name, credits, confidence_level, weak_areas=None, strong_areas=None))]
    fn new(
        name: String,
        credits: f64,
        confidence_level: u8,
        weak_areas: Option<Vec<String>>,
        strong_areas: Option<Vec<String>>,
    ) -> Self {
        Self {
            name,
            credits,
            confidence_level,
            weak_areas: weak_areas.unwrap_or_default(),
            strong_areas: strong_areas.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SubjectProfile(name={:?}, credits={}, weak={}, strong={})",
            self.name,
            self.credits,
            self.weak_areas.len(),
            self.strong_areas.len()
        )
    }
}

/// Weekly study hours as entered in a profile.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyAvailability {
    #[pyo3(get, set)]
    pub weekdays: f64,
    #[pyo3(get, set)]
    pub weekends: f64,
    #[pyo3(get, set)]
    pub preferred_time: Option<String>,
}

impl Default for WeeklyAvailability {
    fn default() -> Self {
        Self {
            weekdays: 3.0,
            weekends: 6.0,
            preferred_time: Some("Night".to_string()),
        }
    }
}

#[pymethods]
impl WeeklyAvailability {
    #[new]
    #[pyo3(signature = (weekdays=None, weekends=None, preferred_time=None))]
    fn new(weekdays: Option<f64>, weekends: Option<f64>, preferred_time: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            weekdays: weekdays.unwrap_or(defaults.weekdays),
            weekends: weekends.unwrap_or(defaults.weekends),
            preferred_time: preferred_time.or(defaults.preferred_time),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "WeeklyAvailability(weekdays={}, weekends={}, preferred_time={:?})",
            self.weekdays, self.weekends, self.preferred_time
        )
    }
}

/// A student's study profile.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[pyo3(get, set)]
    pub subjects: Vec<SubjectProfile>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

#[pymethods]
impl StudentProfile {
    #[new]
    #[pyo3(signature = (subjects, availability=None))]
    fn new(subjects: Vec<SubjectProfile>, availability: Option<WeeklyAvailability>) -> Self {
        Self {
            subjects,
            availability: availability.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!("StudentProfile(subjects={})", self.subjects.len())
    }
}

fn area_topics(subject: &str, kind: &str, areas: &[String], confidence: u8) -> Vec<Topic> {
    areas
        .iter()
        .enumerate()
        .map(|(idx, area)| Topic {
            id: format!("{subject}_{kind}_{idx}"),
            name: area.clone(),
            confidence: Some(confidence),
            prerequisite_ids: Vec::new(),
        })
        .collect()
}

/// Turn one profile subject into a planner subject.
pub fn subject_from_profile(profile: &SubjectProfile) -> Subject {
    let mut topics = area_topics(
        &profile.name,
        "weak",
        &profile.weak_areas,
        WEAK_AREA_CONFIDENCE,
    );
    topics.extend(area_topics(
        &profile.name,
        "strong",
        &profile.strong_areas,
        STRONG_AREA_CONFIDENCE,
    ));

    if topics.is_empty() {
        topics.push(Topic {
            id: format!("{}_general", profile.name),
            name: format!("{} - Core Concepts", profile.name),
            confidence: Some(profile.confidence_level),
            prerequisite_ids: Vec::new(),
        });
    }

    Subject {
        name: profile.name.clone(),
        credit_weight: Some(profile.credits),
        baseline_confidence: Some(profile.confidence_level),
        topics,
    }
}

/// Build a full planning request from a profile.
pub fn request_from_profile(profile: &StudentProfile, start_date: NaiveDate) -> PlanningRequest {
    PlanningRequest {
        subjects: profile.subjects.iter().map(subject_from_profile).collect(),
        availability: Availability {
            weekday_hours: Some(profile.availability.weekdays),
            weekend_hours: Some(profile.availability.weekends),
            date_overrides: Default::default(),
        },
        start_date,
        sprint_length_days: DEFAULT_SPRINT_LENGTH_DAYS,
        preferred_time: profile.availability.preferred_time.clone(),
    }
}
