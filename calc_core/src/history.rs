//! Bounded, newest-first record of completed calculations.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Largest capacity accepted from settings.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// One completed binary operation, e.g. `"12 + 30 = 42"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>) -> Self {
        HistoryEntry {
            expression: expression.into(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        History::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// A capacity of zero keeps nothing. Storage grows with use, so a
    /// large capacity allocates nothing up front.
    pub fn with_capacity(capacity: usize) -> Self {
        History {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Add at the front; the oldest entry falls off past capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_capped() {
        let mut history = History::with_capacity(3);
        for i in 1..=5 {
            history.push(HistoryEntry::new(format!("{} + 0 = {}", i, i)));
        }
        let shown: Vec<String> = history.entries().map(|e| e.to_string()).collect();
        assert_eq!(shown, vec!["5 + 0 = 5", "4 + 0 = 4", "3 + 0 = 3"]);
        assert_eq!(history.latest().unwrap().expression, "5 + 0 = 5");
    }

    #[test]
    fn test_default_capacity() {
        let mut history = History::default();
        for i in 0..25 {
            history.push(HistoryEntry::new(i.to_string()));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut history = History::with_capacity(usize::MAX);
        history.push(HistoryEntry::new("1 + 1 = 2"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn test_zero_capacity() {
        let mut history = History::with_capacity(0);
        history.push(HistoryEntry::new("1 + 1 = 2"));
        assert!(history.is_empty());
    }
}
