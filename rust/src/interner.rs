//! Topic id interning.
//!
//! Maps string topic ids to dense indices so the prerequisite graph can be held
//! in plain vectors. Indices are handed out in first-seen order, which makes the
//! index of a topic equal to its position in the input list.

use rustc_hash::FxHashMap;

/// Dense topic index.
pub type TopicIdx = usize;

/// Interner mapping topic id strings to their input position.
#[derive(Debug, Clone, Default)]
pub struct TopicIdInterner<'a> {
    to_idx: FxHashMap<&'a str, TopicIdx>,
    from_idx: Vec<&'a str>,
}

impl<'a> TopicIdInterner<'a> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern an id, returning its index and whether it was newly added.
    pub fn intern(&mut self, id: &'a str) -> (TopicIdx, bool) {
        if let Some(&idx) = self.to_idx.get(id) {
            return (idx, false);
        }
        let idx = self.from_idx.len();
        self.from_idx.push(id);
        self.to_idx.insert(id, idx);
        (idx, true)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<TopicIdx> {
        self.to_idx.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: TopicIdx) -> Option<&'a str> {
        self.from_idx.get(idx).copied()
    }
}
