//! Recent query history for the front end

use std::collections::VecDeque;

use serde::Serialize;

/// Bounded list of past queries, oldest first
///
/// A query already present is not recorded again. Once full, recording a
/// new query evicts the oldest one.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SearchHistory {
    #[serde(skip)]
    capacity: usize,
    entries: VecDeque<String>,
}

impl SearchHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a query, returning whether it was added
    pub fn record(&mut self, query: &str) -> bool {
        if self.capacity == 0 || self.entries.iter().any(|q| q == query) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(query.to_string());
        true
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
