//! Poll loop driver: fetch, transform, write, report, wait.
//!
//! Two states: `Running` and `Stopped`. `Stopped` is terminal and is entered
//! only when the stop flag is raised or a wait is interrupted. A cycle that
//! runs to completion ends in one of three outcomes, and the outcome alone
//! picks the next wait:
//!
//! - `Updated`: spreadsheet and report rewritten, wait the normal interval.
//! - `FetchFailed`: no data this cycle, nothing written, wait the normal interval.
//! - `Failed`: something after the fetch broke, wait the back-off interval.
//!
//! A stop raised while the fetch is in flight yields `Interrupted`: the
//! fetched data is discarded and the loop stops without waiting.
//!
//! On stop, the latest snapshot is rendered one final time.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{error, info, warn};
use thiserror::Error;

use cryptotrack_core::data::{DataError, MarketDataProvider};
use cryptotrack_core::domain::AssetRecord;
use cryptotrack_core::{summarize, to_table, MetricsError};

use crate::clock::{Clock, SleepOutcome, Sleeper};
use crate::config::TrackerConfig;
use crate::history::{HistoryError, SnapshotHistory};
use crate::reporting::{export_latest_report, write_report, MarkdownReportGenerator, ReportError};
use crate::spreadsheet::{SheetError, SpreadsheetWriter};

/// Errors after a successful fetch. All of them trigger the back-off wait.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("metrics: {0}")]
    Metrics(#[from] MetricsError),

    #[error("history: {0}")]
    History(#[from] HistoryError),

    #[error("spreadsheet: {0}")]
    Sheet(#[from] SheetError),

    #[error("report: {0}")]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Files written by a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleArtifacts {
    pub assets: usize,
    pub spreadsheet: PathBuf,
    pub csv: Option<PathBuf>,
    pub report: PathBuf,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Updated(CycleArtifacts),
    FetchFailed(DataError),
    Failed(CycleError),
    Interrupted,
}

impl CycleOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, CycleOutcome::Updated(_))
    }
}

/// Wait before the next cycle. Only unexpected failures shorten it.
pub fn next_wait(outcome: &CycleOutcome, config: &TrackerConfig) -> Duration {
    match outcome {
        CycleOutcome::Updated(_) | CycleOutcome::FetchFailed(_) | CycleOutcome::Interrupted => {
            config.update_interval()
        }
        CycleOutcome::Failed(_) => config.retry_backoff(),
    }
}

/// Counters for a finished `run`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub cycles: usize,
    pub updates: usize,
    pub fetch_failures: usize,
    pub unexpected_failures: usize,
    pub final_report: Option<PathBuf>,
}

impl LoopSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Updated(_) => self.updates += 1,
            CycleOutcome::FetchFailed(_) => self.fetch_failures += 1,
            CycleOutcome::Failed(_) => self.unexpected_failures += 1,
            CycleOutcome::Interrupted => return,
        }
        self.cycles += 1;
    }
}

/// Owns the snapshot history and drives the provider, writer, and reporter.
pub struct Tracker<'a> {
    config: TrackerConfig,
    provider: &'a dyn MarketDataProvider,
    clock: &'a dyn Clock,
    sleeper: &'a dyn Sleeper,
    stop: Option<&'a AtomicBool>,
    writer: SpreadsheetWriter,
    history: SnapshotHistory,
    state: LoopState,
}

impl<'a> Tracker<'a> {
    pub fn new(
        config: TrackerConfig,
        provider: &'a dyn MarketDataProvider,
        clock: &'a dyn Clock,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            config,
            provider,
            clock,
            sleeper,
            stop: None,
            writer: SpreadsheetWriter,
            history: SnapshotHistory::new(),
            state: LoopState::Running,
        }
    }

    /// Stop flag checked before every fetch.
    pub fn with_stop_flag(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    fn stop_requested(&self) -> bool {
        self.stop.is_some_and(|f| f.load(Ordering::Relaxed))
    }

    /// Run until stopped, then write the final report.
    pub fn run(&mut self) -> LoopSummary {
        info!(
            "Crypto tracker starting: {} every {}s (back-off {}s)",
            self.provider.name(),
            self.config.update_interval_secs,
            self.config.retry_backoff_secs
        );

        let mut summary = LoopSummary::default();

        while self.state == LoopState::Running {
            if self.stop_requested() {
                break;
            }

            let outcome = self.run_cycle();
            summary.record(&outcome);
            if let CycleOutcome::Interrupted = outcome {
                break;
            }

            let wait = next_wait(&outcome, &self.config);
            if let CycleOutcome::Failed(_) = outcome {
                info!("Retrying in {} seconds", wait.as_secs());
            }

            if self.sleeper.sleep(wait) == SleepOutcome::Interrupted {
                break;
            }
        }

        summary.final_report = self.shutdown();
        info!(
            "Crypto tracker stopped after {} cycles ({} updates)",
            summary.cycles, summary.updates
        );
        summary
    }

    /// Execute one fetch -> transform -> write -> report cycle.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let fetched = match self.provider.fetch() {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Error fetching data from {}: {e}", self.provider.name());
                return CycleOutcome::FetchFailed(e);
            }
        };

        if self.stop_requested() {
            info!("Stop requested during fetch; discarding this cycle");
            return CycleOutcome::Interrupted;
        }

        match self.process(&fetched.records) {
            Ok(artifacts) => {
                info!(
                    "Spreadsheet updated at {} ({} assets)",
                    artifacts.spreadsheet.display(),
                    artifacts.assets
                );
                CycleOutcome::Updated(artifacts)
            }
            Err(e) => {
                error!("Cycle failed: {e}");
                CycleOutcome::Failed(e)
            }
        }
    }

    fn process(&mut self, records: &[AssetRecord]) -> Result<CycleArtifacts, CycleError> {
        let timestamp = self.next_timestamp();

        let table = to_table(records, timestamp);
        let summary = summarize(records, timestamp)?;
        self.history.push(summary.clone())?;

        let spreadsheet = self.writer.write(&table, &self.config.spreadsheet_path)?;
        let csv = match &self.config.csv_path {
            Some(path) => Some(self.writer.write_csv(&table, path)?),
            None => None,
        };

        let text = MarkdownReportGenerator.render(&summary, &self.history);
        let report = write_report(&self.config.report_path, &text)?;

        Ok(CycleArtifacts {
            assets: table.len(),
            spreadsheet,
            csv,
            report,
        })
    }

    /// Clock time, never earlier than the latest recorded snapshot.
    fn next_timestamp(&self) -> NaiveDateTime {
        let now = self.clock.now();
        match self.history.latest() {
            Some(latest) if latest.timestamp > now => latest.timestamp,
            _ => now,
        }
    }

    /// Enter `Stopped` and render the final report from the history.
    ///
    /// Only the first call writes; later calls return `None`.
    pub fn shutdown(&mut self) -> Option<PathBuf> {
        if self.state == LoopState::Stopped {
            return None;
        }
        self.state = LoopState::Stopped;

        match export_latest_report(&self.config.report_path, &self.history) {
            Ok(Some(path)) => {
                info!(
                    "Final report written to {} ({} updates)",
                    path.display(),
                    self.history.len()
                );
                Some(path)
            }
            Ok(None) => {
                info!("No snapshots collected; final report skipped");
                None
            }
            Err(e) => {
                error!("Final report failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> CycleOutcome {
        CycleOutcome::Failed(CycleError::Metrics(MetricsError::EmptySnapshot))
    }

    #[test]
    fn backoff_only_after_unexpected_failure() {
        let config = TrackerConfig {
            update_interval_secs: 300,
            retry_backoff_secs: 60,
            ..TrackerConfig::default()
        };
        let updated = CycleOutcome::Updated(CycleArtifacts {
            assets: 1,
            spreadsheet: PathBuf::from("a.xlsx"),
            csv: None,
            report: PathBuf::from("r.md"),
        });
        let fetch_failed = CycleOutcome::FetchFailed(DataError::EmptyResponse);

        assert_eq!(next_wait(&updated, &config), Duration::from_secs(300));
        assert_eq!(next_wait(&fetch_failed, &config), Duration::from_secs(300));
        assert_eq!(next_wait(&failed(), &config), Duration::from_secs(60));
    }

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = LoopSummary::default();
        summary.record(&CycleOutcome::FetchFailed(DataError::EmptyResponse));
        summary.record(&failed());
        summary.record(&CycleOutcome::Interrupted);
        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(summary.unexpected_failures, 1);
        assert_eq!(summary.updates, 0);
    }
}
