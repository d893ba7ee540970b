//! Snapshot history: append-only, in-memory log of cycle summaries.
//!
//! Owned by the poll loop and lent to the report generator, which uses it
//! only for the analysis-period block (first timestamp and update count).
//! Nothing here touches the filesystem.

use chrono::NaiveDateTime;
use thiserror::Error;

use cryptotrack_core::domain::SnapshotSummary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("snapshot at {new} precedes the latest recorded snapshot at {latest}")]
    OutOfOrder {
        latest: NaiveDateTime,
        new: NaiveDateTime,
    },
}

/// Ordered summaries for the lifetime of the process.
///
/// Timestamps are non-decreasing; `push` rejects anything older than the last
/// entry.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    entries: Vec<SnapshotSummary>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, summary: SnapshotSummary) -> Result<(), HistoryError> {
        if let Some(latest) = self.entries.last() {
            if summary.timestamp < latest.timestamp {
                return Err(HistoryError::OutOfOrder {
                    latest: latest.timestamp,
                    new: summary.timestamp,
                });
            }
        }
        self.entries.push(summary);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&SnapshotSummary> {
        self.entries.first()
    }

    pub fn latest(&self) -> Option<&SnapshotSummary> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[SnapshotSummary] {
        &self.entries
    }
}
