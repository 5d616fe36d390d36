//! Per-workflow history
//!
//! Most-recent-first, unbounded, append-only. Nothing is evicted,
//! deduplicated or rewritten once recorded.

use crate::records::Record;
use crate::types::RecordId;
use std::collections::VecDeque;

/// Ordered record history for one workflow
#[derive(Debug, Clone)]
pub struct History<R: Record> {
    /// Front is the most recent record
    entries: VecDeque<R>,
}

impl<R: Record> History<R> {
    /// Create empty history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Insert at position 0
    pub fn prepend(&mut self, record: R) {
        self.entries.push_front(record);
    }

    /// Most recent record
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&R> {
        self.entries.front()
    }

    /// Record at a position, 0 being the most recent
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.entries.get(index)
    }

    /// Find a record by id
    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.entries.iter().find(|r| r.id() == id)
    }

    /// Records, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.entries.iter()
    }

    /// First `limit` records, most recent first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &R> + '_ {
        self.entries.iter().take(limit)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Record> Default for History<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: Record> IntoIterator for &'a History<R> {
    type Item = &'a R;
    type IntoIter = std::collections::vec_deque::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
