//! Recency list of accepted queries
//!
//! Shown in place of suggestions when the query is empty.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of accepted queries remembered
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// A previously accepted query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub query: String,
    pub accepted_at: DateTime<Utc>,
}

/// Bounded, most-recent-first list of accepted queries
#[derive(Debug, Clone)]
pub struct SearchHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl SearchHistory {
    /// Create a history holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Remember an accepted query.
    ///
    /// Returns `false` for blank queries and for queries already present; a
    /// repeat does not move an entry to the front.
    pub fn accept(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.capacity == 0 || self.contains(query) {
            return false;
        }

        self.entries.push_front(HistoryEntry {
            query: query.to_string(),
            accepted_at: Utc::now(),
        });
        self.entries.truncate(self.capacity);
        true
    }

    /// Whether the query is already remembered
    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|e| e.query == query)
    }

    /// Entries, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Remembered queries, most recent first
    pub fn queries(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.query.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
