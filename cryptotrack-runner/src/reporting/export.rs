//! Report file output.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::atomic_write::write_atomic;
use crate::history::SnapshotHistory;
use crate::reporting::reports::MarkdownReportGenerator;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replace the report file with `text`.
pub fn write_report(path: &Path, text: &str) -> Result<PathBuf, ReportError> {
    write_atomic(path, text.as_bytes()).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Render the latest snapshot in `history` and write it to `path`.
///
/// Returns `Ok(None)` without touching the file when the history is empty.
pub fn export_latest_report(
    path: &Path,
    history: &SnapshotHistory,
) -> Result<Option<PathBuf>, ReportError> {
    match MarkdownReportGenerator.render_latest(history) {
        Some(text) => write_report(path, &text).map(Some),
        None => Ok(None),
    }
}
