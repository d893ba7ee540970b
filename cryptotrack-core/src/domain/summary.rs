//! SnapshotSummary: aggregate statistics for one poll cycle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::table::TIMESTAMP_FORMAT;

/// An asset in the top-by-market-cap list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapEntry {
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
}

/// An asset selected as the highest or lowest 24h mover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeEntry {
    pub name: String,
    pub symbol: String,
    pub change_24h_pct: f64,
}

/// Statistics computed once per snapshot. All averages are unweighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub timestamp: NaiveDateTime,
    /// Up to five assets, descending market cap, fetch order on ties.
    pub top_by_market_cap: Vec<MarketCapEntry>,
    pub average_price: f64,
    pub average_volume_24h: f64,
    pub total_market_cap: f64,
    pub highest_change_24h: PriceChangeEntry,
    pub lowest_change_24h: PriceChangeEntry,
}

impl SnapshotSummary {
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
