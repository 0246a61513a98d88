//! Focus level and justification text for scheduled chunks.

use crate::config::PlannerConfig;
use crate::models::{BudgetedTopic, FocusLevel};

/// Focus level and explanation attached to one schedule item.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub focus_level: FocusLevel,
    pub justification: String,
}

/// Classify a chunk of `topic` at the moment it is placed.
///
/// `first_on_day` is true when no other item has been placed on the day yet;
/// only then is a preferred time of day mentioned. A blank preferred time counts
/// as unset.
pub fn annotate(
    topic: &BudgetedTopic,
    first_on_day: bool,
    preferred_time: Option<&str>,
    config: &PlannerConfig,
) -> Annotation {
    let is_weak_area = topic.effective_confidence <= config.high_focus_max_confidence;

    let (focus_level, mut justification) = if is_weak_area {
        let mut text = format!(
            "High Focus required: Weak area ({}/5).",
            topic.effective_confidence
        );
        if first_on_day {
            if let Some(time) = preferred_time.map(str::trim).filter(|t| !t.is_empty()) {
                text.push_str(&format!(" Assigned to your preferred {time} slot."));
            }
        }
        (FocusLevel::HighFocus, text)
    } else {
        (
            FocusLevel::Normal,
            format!("Scheduled based on weight {:.1}.", topic.weight),
        )
    };

    if topic.parent_subject_credit_weight >= config.crucial_min_credit_weight {
        justification.push_str(&format!(
            " Crucial subject (Credits: {}).",
            topic.parent_subject_credit_weight
        ));
    }

    Annotation {
        focus_level,
        justification,
    }
}
