use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::{CoinDetail, CoinSummary};
use crate::models::price::PriceSeries;

/// Trait abstraction over the remote market data source.
///
/// CoinGecko is the only production implementation; tests plug in mocks.
/// Implementations perform exactly one request per call and never retry.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Market listing: one page of coins ranked by market cap, descending.
    async fn fetch_markets(&self) -> Result<Vec<CoinSummary>, CoreError>;

    /// Full record for one coin.
    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, CoreError>;

    /// Price history of one coin over the last `days` days, chronological.
    async fn fetch_market_chart(&self, id: &str, days: u32) -> Result<PriceSeries, CoreError>;
}
