//! Report generators.

pub mod format;
mod markdown;

pub use markdown::MarkdownReportGenerator;
