//! Market data client and ingestion

pub mod coingecko;
pub mod provider;
pub mod validate;

pub use coingecko::{CoinGeckoProvider, DEFAULT_BASE_URL, TOP_N_ASSETS};
pub use provider::{DataError, DataSource, FetchResult, MarketDataProvider};
pub use validate::{ingest, parse_markets, MarketEntry};
