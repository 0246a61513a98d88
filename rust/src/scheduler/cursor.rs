//! Forward-only position in the sprint day sequence.

/// Points at the day currently being filled.
///
/// Shared by every topic in a scheduling pass. It only ever moves forward:
/// there is no way to rewind it, so a day skipped for one topic is never
/// revisited for a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCursor {
    index: usize,
    day_count: usize,
}

impl DayCursor {
    pub fn new(day_count: usize) -> Self {
        Self {
            index: 0,
            day_count,
        }
    }

    /// Index of the current day, or `None` once every day has been passed.
    #[inline]
    pub fn current(&self) -> Option<usize> {
        (self.index < self.day_count).then_some(self.index)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.day_count
    }

    /// Move to the next day. Saturates at the end of the sequence.
    pub fn advance(&mut self) {
        if self.index < self.day_count {
            self.index += 1;
        }
    }
}
