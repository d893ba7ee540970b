//! Snapshot metrics: pure functions from fetched records to derived data.
//!
//! `to_table` projects records into spreadsheet rows with per-row ratios that
//! depend on the snapshot as a whole. `summarize` reduces the same records to
//! a `SnapshotSummary`. Both are recomputed from scratch every cycle.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{
    AssetRecord, AssetRow, AssetTable, MarketCapEntry, PriceChangeEntry, SnapshotSummary,
};

/// Size of the top-by-market-cap list in a summary.
pub const TOP_LIST_LEN: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("cannot summarize an empty snapshot")]
    EmptySnapshot,
}

/// Project records into an `AssetTable`, preserving fetch order.
///
/// Market share is `None` on every row when the snapshot's total market cap
/// is zero; the volume ratio is `None` on rows whose own market cap is zero.
pub fn to_table(records: &[AssetRecord], timestamp: NaiveDateTime) -> AssetTable {
    let cap_total = total(records.iter().map(|r| r.market_cap));

    let rows = records
        .iter()
        .map(|r| AssetRow {
            symbol: r.symbol.clone(),
            name: r.name.clone(),
            price: r.current_price,
            market_cap: r.market_cap,
            volume_24h: r.total_volume,
            change_24h_pct: r.price_change_percentage_24h,
            circulating_supply: r.circulating_supply,
            market_share_pct: market_share_pct(r.market_cap, cap_total),
            volume_to_market_cap: volume_to_market_cap(r.total_volume, r.market_cap),
            last_updated: timestamp,
        })
        .collect();

    AssetTable {
        rows,
        last_updated: timestamp,
    }
}

/// Reduce records to a `SnapshotSummary`.
pub fn summarize(
    records: &[AssetRecord],
    timestamp: NaiveDateTime,
) -> Result<SnapshotSummary, MetricsError> {
    let highest = first_max_by(records, |r| r.price_change_percentage_24h)
        .ok_or(MetricsError::EmptySnapshot)?;
    let lowest = first_min_by(records, |r| r.price_change_percentage_24h)
        .ok_or(MetricsError::EmptySnapshot)?;

    let top_by_market_cap = top_n_by_market_cap(records, TOP_LIST_LEN)
        .into_iter()
        .map(|r| MarketCapEntry {
            name: r.name.clone(),
            symbol: r.symbol.clone(),
            market_cap: r.market_cap,
        })
        .collect();

    Ok(SnapshotSummary {
        timestamp,
        top_by_market_cap,
        average_price: mean(records.iter().map(|r| r.current_price)),
        average_volume_24h: mean(records.iter().map(|r| r.total_volume)),
        total_market_cap: total(records.iter().map(|r| r.market_cap)),
        highest_change_24h: change_entry(highest),
        lowest_change_24h: change_entry(lowest),
    })
}

fn change_entry(r: &AssetRecord) -> PriceChangeEntry {
    PriceChangeEntry {
        name: r.name.clone(),
        symbol: r.symbol.clone(),
        change_24h_pct: r.price_change_percentage_24h,
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// `market_cap / cap_total * 100`, or `None` when the total is zero.
pub fn market_share_pct(market_cap: f64, cap_total: f64) -> Option<f64> {
    if cap_total == 0.0 {
        return None;
    }
    Some(market_cap / cap_total * 100.0)
}

/// `volume / market_cap`, or `None` when the market cap is zero.
pub fn volume_to_market_cap(volume: f64, market_cap: f64) -> Option<f64> {
    if market_cap == 0.0 {
        return None;
    }
    Some(volume / market_cap)
}

pub fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.sum()
}

/// Arithmetic mean. Returns 0.0 for an empty input.
pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / n as f64
}

/// The `n` records with the largest market cap, descending.
///
/// Uses a stable sort, so records with equal caps keep their fetch order.
pub fn top_n_by_market_cap(records: &[AssetRecord], n: usize) -> Vec<&AssetRecord> {
    let mut sorted: Vec<&AssetRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
    sorted.truncate(n);
    sorted
}

/// First record holding the maximum key. Later equal keys never replace it.
pub fn first_max_by<F>(records: &[AssetRecord], key: F) -> Option<&AssetRecord>
where
    F: Fn(&AssetRecord) -> f64,
{
    records.iter().fold(None, |best, r| match best {
        Some(b) if key(r) <= key(b) => Some(b),
        _ => Some(r),
    })
}

/// First record holding the minimum key. Later equal keys never replace it.
pub fn first_min_by<F>(records: &[AssetRecord], key: F) -> Option<&AssetRecord>
where
    F: Fn(&AssetRecord) -> f64,
{
    records.iter().fold(None, |best, r| match best {
        Some(b) if key(r) >= key(b) => Some(b),
        _ => Some(r),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn record(symbol: &str, cap: f64, change: f64) -> AssetRecord {
        AssetRecord {
            symbol: symbol.to_lowercase(),
            name: symbol.to_string(),
            current_price: cap / 10.0,
            market_cap: cap,
            total_volume: cap / 4.0,
            price_change_percentage_24h: change,
            circulating_supply: 10.0,
        }
    }

    fn abc() -> Vec<AssetRecord> {
        vec![
            record("A", 300.0, 5.0),
            record("B", 500.0, -2.0),
            record("C", 200.0, 5.0),
        ]
    }

    #[test]
    fn three_asset_scenario() {
        let records = abc();
        let table = to_table(&records, ts());
        let shares: Vec<f64> = table
            .rows
            .iter()
            .map(|r| r.market_share_pct.unwrap())
            .collect();
        assert_eq!(shares, vec![30.0, 50.0, 20.0]);

        let summary = summarize(&records, ts()).unwrap();
        let order: Vec<&str> = summary
            .top_by_market_cap
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(summary.highest_change_24h.name, "A");
        assert_eq!(summary.lowest_change_24h.name, "B");
        assert_eq!(summary.total_market_cap, 1000.0);
    }

    #[test]
    fn table_keeps_fetch_order_and_timestamp() {
        let table = to_table(&abc(), ts());
        let symbols: Vec<&str> = table.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["a", "b", "c"]);
        assert!(table.rows.iter().all(|r| r.last_updated == ts()));
        assert_eq!(table.last_updated, ts());
    }

    #[test]
    fn zero_market_cap_ratio_is_none() {
        let mut records = abc();
        records.push(record("Z", 0.0, 1.0));
        records[3].total_volume = 42.0;
        let table = to_table(&records, ts());
        let z = table.row("z").unwrap();
        assert_eq!(z.volume_to_market_cap, None);
        assert_eq!(z.market_share_pct, Some(0.0));
        assert_eq!(table.row("a").unwrap().volume_to_market_cap, Some(0.25));
    }

    #[test]
    fn all_zero_caps_give_no_market_share() {
        let records = vec![record("X", 0.0, 1.0), record("Y", 0.0, 2.0)];
        let table = to_table(&records, ts());
        assert!(table.rows.iter().all(|r| r.market_share_pct.is_none()));
        assert!(table.rows.iter().all(|r| r.volume_to_market_cap.is_none()));
    }

    #[test]
    fn averages_are_unweighted() {
        let summary = summarize(&abc(), ts()).unwrap();
        // prices: 30, 50, 20
        assert!((summary.average_price - 100.0 / 3.0).abs() < 1e-9);
        // volumes: 75, 125, 50
        assert!((summary.average_volume_24h - 250.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn top_list_capped_at_five() {
        let records: Vec<AssetRecord> = (0..8)
            .map(|i| record(&format!("S{i}"), (i + 1) as f64 * 10.0, 0.0))
            .collect();
        let summary = summarize(&records, ts()).unwrap();
        assert_eq!(summary.top_by_market_cap.len(), 5);
        assert_eq!(summary.top_by_market_cap[0].name, "S7");
        assert_eq!(summary.top_by_market_cap[4].name, "S3");
    }

    #[test]
    fn top_list_is_stable_on_equal_caps() {
        let records = vec![
            record("First", 100.0, 0.0),
            record("Big", 900.0, 0.0),
            record("Second", 100.0, 0.0),
        ];
        let top = top_n_by_market_cap(&records, 5);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Big", "First", "Second"]);
    }

    #[test]
    fn lowest_change_prefers_first_occurrence() {
        let records = vec![
            record("P", 10.0, -3.0),
            record("Q", 20.0, 1.0),
            record("R", 30.0, -3.0),
        ];
        let summary = summarize(&records, ts()).unwrap();
        assert_eq!(summary.lowest_change_24h.name, "P");
        assert_eq!(summary.highest_change_24h.name, "Q");
    }

    #[test]
    fn single_record_is_both_extremes() {
        let records = vec![record("Solo", 10.0, 0.5)];
        let summary = summarize(&records, ts()).unwrap();
        assert_eq!(summary.highest_change_24h.name, "Solo");
        assert_eq!(summary.lowest_change_24h.name, "Solo");
        assert_eq!(summary.top_by_market_cap.len(), 1);
    }

    #[test]
    fn empty_snapshot_is_error() {
        assert_eq!(summarize(&[], ts()), Err(MetricsError::EmptySnapshot));
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
    }
}
