//! cryptotrack core: domain types, market data client, snapshot metrics.
//!
//! This crate contains the data side of the tracker:
//! - Domain types (asset records, snapshot tables, snapshot summaries)
//! - `MarketDataProvider` trait and the CoinGecko implementation
//! - Ingestion validation at the API boundary
//! - Pure metric functions (`to_table`, `summarize`)

pub mod data;
pub mod domain;
pub mod metrics;

pub use metrics::{summarize, to_table, MetricsError};
