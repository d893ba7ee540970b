//! Markdown report generator.

use cryptotrack_core::domain::SnapshotSummary;

use super::format::{currency, percent};
use crate::history::SnapshotHistory;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    /// Render `summary` with the analysis period taken from `history`.
    ///
    /// The period starts at the first recorded snapshot (or at `summary`
    /// itself when the history is empty) and ends at `summary`.
    pub fn render(&self, summary: &SnapshotSummary, history: &SnapshotHistory) -> String {
        let generated = summary.timestamp_display();
        let start = history
            .first()
            .map(SnapshotSummary::timestamp_display)
            .unwrap_or_else(|| generated.clone());

        let mut report = format!(
            "# Cryptocurrency Market Analysis Report\n\
Generated on: {generated}\n\n\
## Top 5 Cryptocurrencies by Market Cap\n"
        );

        for (rank, entry) in summary.top_by_market_cap.iter().enumerate() {
            report.push_str(&format!(
                "{}. {}: {}\n",
                rank + 1,
                entry.name,
                currency(entry.market_cap)
            ));
        }

        report.push_str(&format!(
            "\n## Market Statistics\n\
- Average Price: {}\n\
- Total Market Cap: {}\n\
- Average 24h Volume: {}\n",
            currency(summary.average_price),
            currency(summary.total_market_cap),
            currency(summary.average_volume_24h),
        ));

        report.push_str(&format!(
            "\n## Price Changes (24h)\n\
- Highest: {} ({}%)\n\
- Lowest: {} ({}%)\n",
            summary.highest_change_24h.name,
            percent(summary.highest_change_24h.change_24h_pct),
            summary.lowest_change_24h.name,
            percent(summary.lowest_change_24h.change_24h_pct),
        ));

        report.push_str(&format!(
            "\n## Analysis Period\n\
- Start Time: {start}\n\
- End Time: {generated}\n\
- Total Updates: {}\n",
            history.len()
        ));

        report
    }

    /// Render the most recent snapshot in `history`, if there is one.
    pub fn render_latest(&self, history: &SnapshotHistory) -> Option<String> {
        history.latest().map(|latest| self.render(latest, history))
    }
}
