//! Markdown report pipeline.

pub mod export;
pub mod reports;

pub use export::{export_latest_report, write_report, ReportError};
pub use reports::MarkdownReportGenerator;
