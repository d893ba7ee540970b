//! Ingestion boundary: wire JSON -> validated `AssetRecord`s.
//!
//! The upstream response is an array of loosely-typed objects. Every field we
//! project must be present and non-null; anything else the API sends is
//! ignored.

use std::collections::HashSet;

use serde::Deserialize;

use super::provider::DataError;
use crate::domain::AssetRecord;

/// One element of the `coins/markets` response, as sent on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketEntry {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
}

/// Parse a raw response body into validated records.
pub fn parse_markets(body: &str) -> Result<Vec<AssetRecord>, DataError> {
    let entries: Vec<MarketEntry> = serde_json::from_str(body).map_err(|e| {
        DataError::ResponseFormatChanged(format!("expected an array of market entries: {e}"))
    })?;
    ingest(entries)
}

/// Validate wire entries and convert them, preserving order.
pub fn ingest(entries: Vec<MarketEntry>) -> Result<Vec<AssetRecord>, DataError> {
    if entries.is_empty() {
        return Err(DataError::EmptyResponse);
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let record = into_record(index, entry)?;
        if !seen.insert(record.symbol.clone()) {
            return Err(DataError::DuplicateSymbol {
                symbol: record.symbol,
            });
        }
        records.push(record);
    }

    Ok(records)
}

fn into_record(index: usize, entry: MarketEntry) -> Result<AssetRecord, DataError> {
    let missing = |field: &'static str| DataError::MissingField { index, field };

    let symbol = entry.symbol.ok_or_else(|| missing("symbol"))?;
    if symbol.trim().is_empty() {
        return Err(DataError::Validation(format!("asset #{index} has an empty symbol")));
    }

    let record = AssetRecord {
        symbol,
        name: entry.name.ok_or_else(|| missing("name"))?,
        current_price: entry.current_price.ok_or_else(|| missing("current_price"))?,
        market_cap: entry.market_cap.ok_or_else(|| missing("market_cap"))?,
        total_volume: entry.total_volume.ok_or_else(|| missing("total_volume"))?,
        price_change_percentage_24h: entry
            .price_change_percentage_24h
            .ok_or_else(|| missing("price_change_percentage_24h"))?,
        circulating_supply: entry
            .circulating_supply
            .ok_or_else(|| missing("circulating_supply"))?,
    };

    if !record.is_finite() {
        return Err(DataError::Validation(format!(
            "{}: non-finite numeric field",
            record.symbol
        )));
    }
    if record.market_cap < 0.0 || record.total_volume < 0.0 || record.circulating_supply < 0.0 {
        return Err(DataError::Validation(format!(
            "{}: negative market cap, volume, or supply",
            record.symbol
        )));
    }

    Ok(record)
}
