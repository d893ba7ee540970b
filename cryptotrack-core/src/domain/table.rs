//! AssetTable: the tabular projection of one snapshot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format shared by the spreadsheet and the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the snapshot table.
///
/// `market_share_pct` and `volume_to_market_cap` are derived from the whole
/// snapshot. `None` marks a value whose denominator was zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRow {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub change_24h_pct: f64,
    pub circulating_supply: f64,
    pub market_share_pct: Option<f64>,
    pub volume_to_market_cap: Option<f64>,
    pub last_updated: NaiveDateTime,
}

impl AssetRow {
    /// `last_updated` rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn last_updated_display(&self) -> String {
        self.last_updated.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Ordered rows of one snapshot, in fetch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTable {
    pub rows: Vec<AssetRow>,
    pub last_updated: NaiveDateTime,
}

impl AssetTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of market share across rows that have one.
    pub fn market_share_total(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.market_share_pct).sum()
    }

    pub fn row(&self, symbol: &str) -> Option<&AssetRow> {
        self.rows.iter().find(|r| r.symbol == symbol)
    }
}
