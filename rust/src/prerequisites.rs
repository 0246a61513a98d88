//! Prerequisite ordering for budgeted topics.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::interner::{TopicIdInterner, TopicIdx};
use crate::models::BudgetedTopic;

/// Topic order produced by [`sort_by_prerequisites`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrerequisiteOrder {
    /// Indices into the input slice; every input topic appears exactly once.
    pub order: Vec<TopicIdx>,
    /// Ids of topics that sit on or behind a prerequisite cycle and were
    /// appended in input order after the sorted topics.
    pub unresolved: Vec<String>,
}

impl PrerequisiteOrder {
    /// Borrow the topics in scheduling order.
    pub fn apply<'a>(&self, topics: &'a [BudgetedTopic]) -> Vec<&'a BudgetedTopic> {
        self.order.iter().map(|&idx| &topics[idx]).collect()
    }
}

/// Order topics so that prerequisites come before their dependents.
///
/// Kahn's algorithm with a FIFO ready queue seeded in input order, so ties are
/// broken by input position rather than weight. Prerequisite ids that do not
/// name a topic in the set are ignored. Topics that can never become ready
/// (cycles and anything downstream of one) are appended in input order, so the
/// result is always a total order over the input.
///
/// Topic ids are expected to be unique, as checked by
/// [`validate_request`](crate::validation::validate_request).
pub fn sort_by_prerequisites(topics: &[BudgetedTopic]) -> PrerequisiteOrder {
    let mut interner = TopicIdInterner::with_capacity(topics.len());
    for topic in topics {
        interner.intern(&topic.id);
    }

    // dependents[p] lists topics that require p
    let mut dependents: Vec<Vec<TopicIdx>> = vec![Vec::new(); topics.len()];
    let mut in_degree: Vec<usize> = vec![0; topics.len()];

    for (idx, topic) in topics.iter().enumerate() {
        let mut seen: FxHashSet<TopicIdx> = FxHashSet::default();
        for prereq_id in &topic.prerequisite_ids {
            let Some(prereq_idx) = interner.get(prereq_id) else {
                continue;
            };
            if seen.insert(prereq_idx) {
                dependents[prereq_idx].push(idx);
                in_degree[idx] += 1;
            }
        }
    }

    let mut queue: VecDeque<TopicIdx> = (0..topics.len())
        .filter(|&idx| in_degree[idx] == 0)
        .collect();

    let mut order: Vec<TopicIdx> = Vec::with_capacity(topics.len());
    let mut visited = vec![false; topics.len()];

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        visited[idx] = true;

        for &dependent in &dependents[idx] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    let mut unresolved = Vec::new();
    for (idx, done) in visited.iter().enumerate() {
        if !done {
            order.push(idx);
            if let Some(id) = interner.resolve(idx) {
                unresolved.push(id.to_string());
            }
        }
    }

    PrerequisiteOrder { order, unresolved }
}
