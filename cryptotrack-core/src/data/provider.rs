//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the upstream API so the poll
//! loop can be driven by a scripted provider in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AssetRecord;

/// Structured error types for fetch and ingestion.
///
/// Every variant means "no data this cycle". None of them is fatal to the
/// caller.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from market data API")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("market data API returned no assets")]
    EmptyResponse,

    #[error("asset #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("duplicate symbol in snapshot: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Where a fetch result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CoinGecko,
    Fixture,
}

/// Result of a successful fetch: validated records in API order.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub records: Vec<AssetRecord>,
    pub source: DataSource,
}

/// Trait for market data providers.
///
/// Implementations issue exactly one request per call and never retry;
/// retry policy belongs to the poll loop.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the current top-asset listing.
    fn fetch(&self) -> Result<FetchResult, DataError>;
}
