//! Core greedy packing loop.

use crate::config::PlannerConfig;
use crate::models::{BudgetedTopic, ScheduleItem, SprintDay, Underscheduled};
use crate::{log_debug, log_decisions, log_placements};

use super::annotation::annotate;
use super::cursor::DayCursor;

/// Hour amounts at or below this are treated as zero.
pub const HOURS_EPSILON: f64 = 1e-9;

/// Filled sprint days plus any hours that did not fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleOutcome {
    pub days: Vec<SprintDay>,
    pub underscheduled: Vec<Underscheduled>,
}

/// Greedy scheduler packing topic budgets into day buckets.
pub struct SprintScheduler<'a> {
    config: &'a PlannerConfig,
    preferred_time: Option<&'a str>,
}

impl<'a> SprintScheduler<'a> {
    pub fn new(config: &'a PlannerConfig, preferred_time: Option<&'a str>) -> Self {
        Self {
            config,
            preferred_time,
        }
    }

    /// Place every topic, in the given order, into `days`.
    ///
    /// One [`DayCursor`] is shared across all topics. A topic whose budget is
    /// still open when the cursor runs off the last day is reported in
    /// [`ScheduleOutcome::underscheduled`] with the hours that were left.
    pub fn schedule(&self, mut days: Vec<SprintDay>, topics: &[&BudgetedTopic]) -> ScheduleOutcome {
        let verbosity = self.config.verbosity;
        let mut cursor = DayCursor::new(days.len());
        let mut underscheduled: Vec<Underscheduled> = Vec::new();

        for topic in topics {
            let remaining = self.place_topic(topic, &mut days, &mut cursor);

            if remaining > HOURS_EPSILON {
                log_placements!(
                    verbosity,
                    "  Underscheduled {}: {}h did not fit before the sprint ended",
                    topic.id,
                    remaining
                );
                underscheduled.push(Underscheduled {
                    topic_id: topic.id.clone(),
                    shortfall_hours: remaining,
                });
            }
        }

        ScheduleOutcome {
            days,
            underscheduled,
        }
    }

    /// Place one topic's budget starting at the cursor. Returns the hours left over.
    fn place_topic(
        &self,
        topic: &BudgetedTopic,
        days: &mut [SprintDay],
        cursor: &mut DayCursor,
    ) -> f64 {
        let verbosity = self.config.verbosity;
        let mut remaining = topic.allocated_hours;

        while remaining > HOURS_EPSILON {
            let Some(day_idx) = cursor.current() else {
                break;
            };
            let day = &mut days[day_idx];
            let free = day.free_hours();

            if free <= HOURS_EPSILON {
                log_decisions!(verbosity, "  Skipping {}: no free hours", day.date);
                cursor.advance();
                continue;
            }

            let chunk = remaining.min(free);
            let note = annotate(topic, day.items.is_empty(), self.preferred_time, self.config);

            log_placements!(
                verbosity,
                "  Placed {} on {} for {}h ({})",
                topic.id,
                day.date,
                chunk,
                note.focus_level
            );

            day.items.push(ScheduleItem {
                topic_id: topic.id.clone(),
                topic_name: topic.name.clone(),
                subject_name: topic.parent_subject_name.clone(),
                duration_hours: chunk,
                focus_level: note.focus_level,
                justification: note.justification,
            });

            // Snap to capacity so a filled day never drifts past it
            day.hours_scheduled = if free - chunk <= HOURS_EPSILON {
                day.hours_available
            } else {
                (day.hours_scheduled + chunk).min(day.hours_available)
            };
            remaining -= chunk;

            if day.free_hours() <= HOURS_EPSILON {
                log_debug!(verbosity, "    Day {} is full, advancing cursor", day.date);
                cursor.advance();
            }
        }

        remaining.max(0.0)
    }
}
