//! Input shape checks run before any planning work.
//!
//! Everything that has a sensible fallback (missing confidence, missing
//! availability, unknown prerequisites) is accepted here; only input that cannot
//! be planned at all is rejected.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::models::{PlanningRequest, MAX_SPRINT_LENGTH_DAYS};

/// Malformed planning input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Topic in subject {subject:?} has an empty id")]
    MissingTopicId { subject: String },
    #[error("Duplicate topic id: {0}")]
    DuplicateTopicId(String),
    #[error("Duplicate subject name: {0}")]
    DuplicateSubject(String),
    #[error("Invalid hours for {context}: {hours} (must be a non-negative number)")]
    InvalidHours { context: String, hours: f64 },
    #[error("Sprint length must be between 1 and {max} days, got {0}", max = MAX_SPRINT_LENGTH_DAYS)]
    InvalidSprintLength(i32),
    #[error("Confidence for {context} must be between 1 and 5, got {value}")]
    ConfidenceOutOfRange { context: String, value: u8 },
    #[error("Credit weight for subject {subject:?} must be a non-negative number, got {value}")]
    InvalidCreditWeight { subject: String, value: f64 },
    #[error("Priority weight for {0} is not a finite number; credit weights are too large")]
    WeightOverflow(String),
}

fn check_hours(context: impl FnOnce() -> String, hours: f64) -> Result<(), ValidationError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours {
            context: context(),
            hours,
        })
    }
}

fn check_confidence(
    context: impl FnOnce() -> String,
    confidence: Option<u8>,
) -> Result<(), ValidationError> {
    match confidence {
        Some(value) if !(1..=5).contains(&value) => Err(ValidationError::ConfidenceOutOfRange {
            context: context(),
            value,
        }),
        _ => Ok(()),
    }
}

/// Validate a planning request, returning the first problem found.
pub fn validate_request(request: &PlanningRequest) -> Result<(), ValidationError> {
    if !(1..=MAX_SPRINT_LENGTH_DAYS).contains(&request.sprint_length_days) {
        return Err(ValidationError::InvalidSprintLength(
            request.sprint_length_days,
        ));
    }

    let availability = &request.availability;
    if let Some(hours) = availability.weekday_hours {
        check_hours(|| "weekdays".to_string(), hours)?;
    }
    if let Some(hours) = availability.weekend_hours {
        check_hours(|| "weekends".to_string(), hours)?;
    }
    for (date, &hours) in &availability.date_overrides {
        check_hours(|| date.to_string(), hours)?;
    }

    let mut subject_names: FxHashSet<&str> = FxHashSet::default();
    let mut topic_ids: FxHashSet<&str> = FxHashSet::default();

    for subject in &request.subjects {
        if !subject_names.insert(subject.name.as_str()) {
            return Err(ValidationError::DuplicateSubject(subject.name.clone()));
        }
        if let Some(value) = subject.credit_weight {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidCreditWeight {
                    subject: subject.name.clone(),
                    value,
                });
            }
        }
        check_confidence(
            || format!("subject {:?}", subject.name),
            subject.baseline_confidence,
        )?;

        for topic in &subject.topics {
            if topic.id.trim().is_empty() {
                return Err(ValidationError::MissingTopicId {
                    subject: subject.name.clone(),
                });
            }
            if !topic_ids.insert(topic.id.as_str()) {
                return Err(ValidationError::DuplicateTopicId(topic.id.clone()));
            }
            check_confidence(|| format!("topic {:?}", topic.id), topic.confidence)?;
        }
    }

    Ok(())
}
