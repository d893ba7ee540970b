//! cryptotrack runner: poll loop, snapshot history, spreadsheet and report output.
//!
//! This crate builds on `cryptotrack-core` to provide:
//! - TOML configuration with defaults
//! - In-memory snapshot history
//! - `.xlsx` spreadsheet writer with an optional CSV mirror
//! - Markdown report generator
//! - Clock and interruptible sleep abstractions
//! - The poll loop driver with its two-interval retry policy

pub mod atomic_write;
pub mod clock;
pub mod config;
pub mod history;
pub mod poller;
pub mod reporting;
pub mod spreadsheet;

pub use clock::{Clock, InterruptibleSleeper, SleepOutcome, Sleeper, SystemClock};
pub use config::{ConfigError, TrackerConfig};
pub use history::{HistoryError, SnapshotHistory};
pub use poller::{
    next_wait, CycleArtifacts, CycleError, CycleOutcome, LoopState, LoopSummary, Tracker,
};
pub use reporting::{MarkdownReportGenerator, ReportError};
pub use spreadsheet::{SheetError, SpreadsheetWriter};
