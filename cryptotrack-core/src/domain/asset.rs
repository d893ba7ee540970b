//! AssetRecord: one tracked asset as reported by the market data API.

use serde::{Deserialize, Serialize};

/// Market data for a single asset at fetch time.
///
/// All monetary values are in USD. Records are validated at the ingestion
/// boundary (see `data::validate`) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    pub circulating_supply: f64,
}

impl AssetRecord {
    /// Returns true if every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.current_price.is_finite()
            && self.market_cap.is_finite()
            && self.total_volume.is_finite()
            && self.price_change_percentage_24h.is_finite()
            && self.circulating_supply.is_finite()
    }
}
