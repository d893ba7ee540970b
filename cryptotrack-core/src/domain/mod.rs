//! Domain types for cryptotrack

pub mod asset;
pub mod summary;
pub mod table;

pub use asset::AssetRecord;
pub use summary::{MarketCapEntry, PriceChangeEntry, SnapshotSummary};
pub use table::{AssetRow, AssetTable, TIMESTAMP_FORMAT};
