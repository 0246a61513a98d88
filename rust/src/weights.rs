//! Priority weights and proportional hour budgets.
//!
//! Every topic gets a weight combining its subject's credit weight (importance)
//! and its inverted confidence (remediation urgency). Weights are then turned
//! into shares of the total sprint capacity.
//!
//! Budgets are rounded independently and never renormalized, so their sum may
//! drift slightly from the available hours.

use crate::config::WeightPolicy;
use crate::models::{BudgetedTopic, Subject, Topic};
use crate::validation::ValidationError;

/// Smallest budget worth scheduling.
pub const MIN_CHUNK_HOURS: f64 = 0.5;

/// Topic confidence, else subject baseline, else the policy default.
pub fn effective_confidence(topic: &Topic, subject: &Subject, policy: &WeightPolicy) -> u8 {
    topic
        .confidence
        .or(subject.baseline_confidence)
        .unwrap_or(policy.default_confidence)
}

/// Compute a topic's priority weight.
///
/// Confidence is inverted (`6 - confidence`) so weak topics score near 5.
pub fn compute_weight(credit_weight: f64, effective_confidence: u8, policy: &WeightPolicy) -> f64 {
    let confidence_score = 6.0 - f64::from(effective_confidence);
    credit_weight * policy.credit_multiplier + confidence_score * policy.confidence_multiplier
}

/// Round a raw budget to the nearest half hour.
///
/// Positive budgets under half an hour are lifted to exactly 0.5.
pub fn round_allocation(raw_hours: f64) -> f64 {
    if raw_hours > 0.0 && raw_hours < MIN_CHUNK_HOURS {
        return MIN_CHUNK_HOURS;
    }
    (raw_hours * 2.0).round() / 2.0
}

/// Weight every topic and split `total_available_hours` among them.
///
/// Topics are returned flattened in subject order. An empty topic set yields an
/// empty allocation; if all weights are zero every topic gets zero hours.
/// Fails when a weight or the weight total is not a finite number.
pub fn allocate_hours(
    subjects: &[Subject],
    total_available_hours: f64,
    policy: &WeightPolicy,
) -> Result<Vec<BudgetedTopic>, ValidationError> {
    let mut topics: Vec<BudgetedTopic> = subjects
        .iter()
        .flat_map(|subject| {
            let credit_weight = subject
                .credit_weight
                .unwrap_or(policy.default_credit_weight);
            subject.topics.iter().map(move |topic| {
                let confidence = effective_confidence(topic, subject, policy);
                BudgetedTopic {
                    id: topic.id.clone(),
                    name: topic.name.clone(),
                    confidence: topic.confidence,
                    effective_confidence: confidence,
                    prerequisite_ids: topic.prerequisite_ids.clone(),
                    parent_subject_name: subject.name.clone(),
                    parent_subject_credit_weight: credit_weight,
                    weight: compute_weight(credit_weight, confidence, policy),
                    allocated_hours: 0.0,
                }
            })
        })
        .collect();

    if let Some(topic) = topics.iter().find(|t| !t.weight.is_finite()) {
        return Err(ValidationError::WeightOverflow(format!("topic {:?}", topic.id)));
    }
    let total_weight: f64 = topics.iter().map(|t| t.weight).sum();
    if !total_weight.is_finite() {
        return Err(ValidationError::WeightOverflow("the weight total".to_string()));
    }
    if total_weight <= 0.0 {
        return Ok(topics);
    }

    for topic in &mut topics {
        let raw = topic.weight / total_weight * total_available_hours;
        topic.allocated_hours = round_allocation(raw);
    }

    Ok(topics)
}
