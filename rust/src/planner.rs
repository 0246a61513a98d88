//! Sprint planning entry point.
//!
//! Runs the pipeline for one request:
//! 1. Validates input shape
//! 2. Builds the sprint days and their capacity
//! 3. Weights topics and assigns hour budgets
//! 4. Orders topics by prerequisites
//! 5. Packs budgets into days

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::adapter::{request_from_profile, StudentProfile};
use crate::calendar::{build_sprint_days, total_available_hours};
use crate::config::PlannerConfig;
use crate::models::{PlanningRequest, SprintPlan};
use crate::prerequisites::sort_by_prerequisites;
use crate::scheduler::SprintScheduler;
use crate::validation::{validate_request, ValidationError};
use crate::weights::allocate_hours;
use crate::{log_decisions, log_placements};

/// Errors that can occur while planning a sprint.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Invalid planning request: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compute one sprint schedule for `request`.
///
/// Lenient about missing data (defaults, zero capacity, cycle fallback); fails
/// only on malformed input or weights too large to budget, before anything is
/// scheduled.
pub fn plan_sprint(
    request: &PlanningRequest,
    config: &PlannerConfig,
) -> Result<SprintPlan, PlanningError> {
    config.validate().map_err(PlanningError::InvalidConfig)?;
    validate_request(request)?;

    let verbosity = config.verbosity;
    let sprint_length = request.sprint_length_days as usize;

    let days = build_sprint_days(&request.availability, request.start_date, sprint_length);
    let available_hours = total_available_hours(&days);

    log_placements!(
        verbosity,
        "Planning {}-day sprint from {} with {}h available",
        sprint_length,
        request.start_date,
        available_hours
    );

    let topics = allocate_hours(&request.subjects, available_hours, &config.weight_policy)?;
    for topic in &topics {
        log_decisions!(
            verbosity,
            "  Topic {} (confidence={}, weight={:.1}) budget {}h",
            topic.id,
            topic.effective_confidence,
            topic.weight,
            topic.allocated_hours
        );
    }

    let order = sort_by_prerequisites(&topics);
    if !order.unresolved.is_empty() {
        log_decisions!(
            verbosity,
            "  Prerequisite cycle: appending {} in input order",
            order.unresolved.join(", ")
        );
    }

    let ordered = order.apply(&topics);
    let scheduler = SprintScheduler::new(config, request.preferred_time.as_deref());
    let outcome = scheduler.schedule(days, &ordered);

    let allocated_hours: f64 = topics.iter().map(|t| t.allocated_hours).sum();
    let scheduled_hours: f64 = outcome.days.iter().map(|d| d.hours_scheduled).sum();

    let mut metadata = BTreeMap::new();
    metadata.insert(
        "sprint_length_days".to_string(),
        request.sprint_length_days.to_string(),
    );
    metadata.insert("topic_count".to_string(), topics.len().to_string());
    metadata.insert(
        "total_available_hours".to_string(),
        available_hours.to_string(),
    );
    metadata.insert(
        "total_allocated_hours".to_string(),
        allocated_hours.to_string(),
    );
    metadata.insert(
        "total_scheduled_hours".to_string(),
        scheduled_hours.to_string(),
    );
    metadata.insert(
        "allocation_drift_hours".to_string(),
        (allocated_hours - available_hours).to_string(),
    );
    metadata.insert(
        "cyclic_topic_count".to_string(),
        order.unresolved.len().to_string(),
    );
    metadata.insert(
        "underscheduled_count".to_string(),
        outcome.underscheduled.len().to_string(),
    );

    let ordered_topics = ordered.into_iter().cloned().collect();

    Ok(SprintPlan {
        days: outcome.days,
        topics: ordered_topics,
        underscheduled: outcome.underscheduled,
        plan_metadata: metadata,
    })
}

/// Plan a sprint from a JSON request, returning the plan as JSON.
pub fn plan_sprint_json(request_json: &str, config: &PlannerConfig) -> Result<String, PlanningError> {
    let request: PlanningRequest = serde_json::from_str(request_json)?;
    let plan = plan_sprint(&request, config)?;
    Ok(serde_json::to_string(&plan)?)
}

/// Plan a default-length sprint straight from a student profile.
pub fn plan_from_profile(
    profile: &StudentProfile,
    start_date: NaiveDate,
    config: &PlannerConfig,
) -> Result<SprintPlan, PlanningError> {
    plan_sprint(&request_from_profile(profile, start_date), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{SubjectProfile, WeeklyAvailability};
    use crate::models::{Availability, FocusLevel, Subject, Topic};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_topic(id: &str, confidence: Option<u8>, prereqs: &[&str]) -> Topic {
        Topic {
            id: id.to_string(),
            name: id.to_string(),
            confidence,
            prerequisite_ids: prereqs.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn make_request(subjects: Vec<Subject>, weekday: f64, weekend: f64) -> PlanningRequest {
        PlanningRequest {
            subjects,
            availability: Availability {
                weekday_hours: Some(weekday),
                weekend_hours: Some(weekend),
                date_overrides: BTreeMap::new(),
            },
            // Saturday
            start_date: d(2024, 5, 4),
            sprint_length_days: 7,
            preferred_time: None,
        }
    }

    #[test]
    fn test_single_weak_topic_on_crucial_subject() {
        let subject = Subject {
            name: "Data Structures".to_string(),
            credit_weight: Some(4.0),
            baseline_confidence: Some(2),
            topics: vec![Topic {
                id: "ds_trees".to_string(),
                name: "Trees".to_string(),
                confidence: Some(2),
                prerequisite_ids: vec![],
            }],
        };
        let plan = plan_sprint(&make_request(vec![subject], 3.0, 6.0), &PlannerConfig::default())
            .unwrap();

        assert_eq!(plan.days.len(), 7);
        let saturday = &plan.days[0];
        assert_eq!(saturday.weekday_name, "Saturday");
        assert_eq!(saturday.hours_available, 6.0);
        assert_eq!(saturday.items.len(), 1);

        let item = &saturday.items[0];
        assert_eq!(item.topic_name, "Trees");
        assert_eq!(item.subject_name, "Data Structures");
        assert_eq!(item.duration_hours, 6.0);
        assert_eq!(item.focus_level, FocusLevel::HighFocus);
        assert!(item.justification.contains("2/5"));
        assert!(item.justification.contains("Crucial subject"));

        // The only topic takes the whole 27h sprint
        assert_eq!(plan.topics[0].allocated_hours, 27.0);
        assert_eq!(plan.scheduled_hours_for("ds_trees"), 27.0);
        assert!(plan.underscheduled.is_empty());
    }

    #[test]
    fn test_prerequisite_scheduled_first() {
        let subject = Subject {
            name: "Algorithms".to_string(),
            credit_weight: Some(3.0),
            baseline_confidence: None,
            // a is weaker (heavier) but needs b
            topics: vec![
                make_topic("a", Some(1), &["b"]),
                make_topic("b", Some(5), &[]),
            ],
        };
        let plan = plan_sprint(&make_request(vec![subject], 3.0, 6.0), &PlannerConfig::default())
            .unwrap();

        let ids: Vec<&str> = plan.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(plan.days[0].items[0].topic_id, "b");
    }

    #[test]
    fn test_cycle_does_not_fail() {
        let subject = Subject {
            name: "Algorithms".to_string(),
            credit_weight: None,
            baseline_confidence: None,
            topics: vec![make_topic("a", None, &["b"]), make_topic("b", None, &["a"])],
        };
        let plan = plan_sprint(&make_request(vec![subject], 3.0, 6.0), &PlannerConfig::default())
            .unwrap();

        let ids: Vec<&str> = plan.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(plan.plan_metadata["cyclic_topic_count"], "2");
    }

    #[test]
    fn test_zero_availability_yields_empty_days() {
        let subject = Subject {
            name: "Networks".to_string(),
            credit_weight: Some(5.0),
            baseline_confidence: Some(1),
            topics: vec![make_topic("tcp", None, &[]), make_topic("udp", Some(4), &[])],
        };
        let plan = plan_sprint(&make_request(vec![subject], 0.0, 0.0), &PlannerConfig::default())
            .unwrap();

        assert_eq!(plan.days.len(), 7);
        assert!(plan.days.iter().all(|day| day.items.is_empty()));
        assert!(plan.topics.iter().all(|t| t.allocated_hours == 0.0));
        assert!(plan.underscheduled.is_empty());
    }

    #[test]
    fn test_no_topics_is_a_valid_empty_plan() {
        let plan = plan_sprint(&make_request(vec![], 3.0, 6.0), &PlannerConfig::default()).unwrap();
        assert!(plan.topics.is_empty());
        assert!(plan.days.iter().all(|day| day.items.is_empty()));
        assert_eq!(plan.plan_metadata["topic_count"], "0");
    }

    #[test]
    fn test_rounding_drift_is_underscheduled_not_failed() {
        // Three equal topics share 10h: each rounds to 3.5 (10.5 total)
        let subject = Subject {
            name: "S".to_string(),
            credit_weight: Some(3.0),
            baseline_confidence: Some(3),
            topics: vec![
                make_topic("a", None, &[]),
                make_topic("b", None, &[]),
                make_topic("c", None, &[]),
            ],
        };
        let mut request = make_request(vec![subject], 5.0, 5.0);
        request.sprint_length_days = 2;
        let plan = plan_sprint(&request, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.plan_metadata["total_allocated_hours"], "10.5");
        assert_eq!(plan.plan_metadata["allocation_drift_hours"], "0.5");
        assert_eq!(plan.underscheduled.len(), 1);
        assert_eq!(plan.underscheduled[0].topic_id, "c");
        assert_eq!(plan.underscheduled[0].shortfall_hours, 0.5);
        assert_eq!(plan.scheduled_hours_for("c"), 3.0);
        for day in &plan.days {
            assert!(day.hours_scheduled <= day.hours_available);
        }
    }

    #[test]
    fn test_invalid_input_fails_whole_run() {
        let subject = Subject {
            name: "S".to_string(),
            credit_weight: None,
            baseline_confidence: None,
            topics: vec![make_topic("dup", None, &[]), make_topic("dup", None, &[])],
        };
        let err = plan_sprint(&make_request(vec![subject], 3.0, 6.0), &PlannerConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Validation(ValidationError::DuplicateTopicId(_))
        ));

        let mut request = make_request(vec![], 3.0, 6.0);
        request.sprint_length_days = 0;
        assert!(plan_sprint(&request, &PlannerConfig::default()).is_err());
    }

    #[test]
    fn test_huge_credit_weight_fails_instead_of_producing_nan() {
        let huge = Subject {
            name: "Huge".to_string(),
            credit_weight: Some(f64::MAX),
            baseline_confidence: None,
            topics: vec![make_topic("big", None, &[])],
        };
        let small = Subject {
            name: "Small".to_string(),
            credit_weight: Some(3.0),
            baseline_confidence: None,
            topics: vec![make_topic("small", None, &[])],
        };
        let err = plan_sprint(&make_request(vec![huge, small], 3.0, 6.0), &PlannerConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Validation(ValidationError::WeightOverflow(_))
        ));
    }

    #[test]
    fn test_blank_preferred_time_is_not_mentioned() {
        let subject = Subject {
            name: "Algorithms".to_string(),
            credit_weight: Some(3.0),
            baseline_confidence: None,
            topics: vec![make_topic("dp", Some(2), &[])],
        };
        let mut request = make_request(vec![subject], 3.0, 6.0);
        request.preferred_time = Some("".to_string());
        let plan = plan_sprint(&request, &PlannerConfig::default()).unwrap();

        assert_eq!(
            plan.days[0].items[0].justification,
            "High Focus required: Weak area (2/5)."
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PlannerConfig::default();
        config.weight_policy.credit_multiplier = f64::NAN;
        let err = plan_sprint(&make_request(vec![], 3.0, 6.0), &config).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidConfig(_)));
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let profile = StudentProfile {
            subjects: vec![
                SubjectProfile {
                    name: "Data Structures".to_string(),
                    credits: 4.0,
                    confidence_level: 3,
                    weak_areas: vec!["Trees".to_string(), "Dynamic Programming".to_string()],
                    strong_areas: vec!["Arrays".to_string(), "LinkedLists".to_string()],
                },
                SubjectProfile {
                    name: "Operating Systems".to_string(),
                    credits: 3.0,
                    confidence_level: 4,
                    weak_areas: vec![],
                    strong_areas: vec!["Processes".to_string()],
                },
            ],
            availability: WeeklyAvailability {
                weekdays: 3.0,
                weekends: 6.0,
                preferred_time: Some("Morning".to_string()),
            },
        };
        let config = PlannerConfig::default();
        let first = plan_from_profile(&profile, d(2024, 5, 4), &config).unwrap();
        let second = plan_from_profile(&profile, d(2024, 5, 4), &config).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.topics.len(), 5);
        assert!(first.days[0].items[0]
            .justification
            .contains("preferred Morning slot"));
    }

    #[test]
    fn test_json_round_trip_entry_point() {
        let request = r#"{
            "subjects": [{
                "name": "Data Structures",
                "creditWeight": 4,
                "topics": [
                    {"id": "trees", "name": "Trees", "confidence": 2},
                    {"id": "graphs", "name": "Graphs", "prerequisiteIds": ["trees"]}
                ]
            }],
            "availability": {"weekdayHours": 3, "weekendHours": 6, "dateOverrides": {"2024-05-05": 0}},
            "startDate": "2024-05-04",
            "preferredTime": "Morning"
        }"#;

        let output = plan_sprint_json(request, &PlannerConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let days = value["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2024-05-04");
        assert_eq!(days[1]["hoursAvailable"], 0.0);
        assert_eq!(days[0]["items"][0]["topicId"], "trees");
        assert_eq!(days[0]["items"][0]["focusLevel"], "High Focus");
        assert_eq!(value["topics"][1]["id"], "graphs");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = plan_sprint_json("{\"subjects\": 3}", &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlanningError::Json(_)));
    }
}
