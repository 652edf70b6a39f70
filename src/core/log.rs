//! Bounded action log.
//!
//! Human-readable entries describing what happened in a match, kept in a
//! ring buffer so a long game never grows without bound. The presentation
//! layer renders these verbatim.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of retained entries.
pub const LOG_CAPACITY: usize = 50;

/// Append-only log with a fixed retention window.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionLog {
    entries: VecDeque<String>,
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest once past capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}
