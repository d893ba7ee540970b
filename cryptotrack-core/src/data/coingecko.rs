//! CoinGecko market data provider.
//!
//! Fetches the top assets by market capitalization from the public
//! `coins/markets` endpoint. One request per call, no retries, no API key.

use std::time::Duration;

use log::debug;

use super::provider::{DataError, DataSource, FetchResult, MarketDataProvider};
use super::validate::parse_markets;

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Number of assets requested per snapshot.
pub const TOP_N_ASSETS: u32 = 50;

/// Fixed query for the top-assets listing.
fn market_query() -> [(&'static str, String); 5] {
    [
        ("vs_currency", "usd".to_string()),
        ("order", "market_cap_desc".to_string()),
        ("per_page", TOP_N_ASSETS.to_string()),
        ("page", "1".to_string()),
        ("sparkline", "false".to_string()),
    ]
}

/// CoinGecko data provider.
pub struct CoinGeckoProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cryptotrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }
}

impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch(&self) -> Result<FetchResult, DataError> {
        let url = self.markets_url();
        debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .query(&market_query())
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::ResponseFormatChanged(format!("failed to read body: {e}")))?;

        let records = parse_markets(&body)?;
        debug!("{} returned {} assets", self.name(), records.len());

        Ok(FetchResult {
            records,
            source: DataSource::CoinGecko,
        })
    }
}
