//! Activity log: the permanent, append-only feed of what happened.

use serde::{Deserialize, Serialize};

use crate::id::LogEntryId;
use crate::time::Timestamp;

/// Severity tag of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Alert,
    Error,
    Success,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Alert => f.write_str("alert"),
            Self::Error => f.write_str("error"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// A single line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    pub timestamp: Timestamp,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    /// Create an entry with a fresh id.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity, timestamp: Timestamp) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp,
            message: message.into(),
            severity,
        }
    }
}

/// Append-only, insertion-ordered collection of [`LogEntry`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    /// Append an entry and return a reference to it.
    pub fn append(&mut self, entry: LogEntry) -> &LogEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The `limit` newest entries, oldest first.
    #[must_use]
    pub fn tail(&self, limit: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}
