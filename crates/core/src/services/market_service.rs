use crate::errors::CoreError;
use crate::models::coin::{CoinDetail, CoinSummary};
use crate::models::price::PriceSeries;
use crate::providers::traits::MarketDataProvider;

/// Fetches market data with the dashboard's failure policy.
///
/// - **No retry, no cache**: every call goes to the provider.
/// - **List**: one request; any failure becomes [`CoreError::ListFetch`].
/// - **Detail**: detail and chart requests run concurrently and succeed or
///   fail together; any failure becomes [`CoreError::DetailFetch`].
pub struct MarketDataService {
    provider: Box<dyn MarketDataProvider>,
    chart_days: u32,
}

impl MarketDataService {
    pub fn new(provider: Box<dyn MarketDataProvider>, chart_days: u32) -> Self {
        Self {
            provider,
            chart_days,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn chart_days(&self) -> u32 {
        self.chart_days
    }

    /// Fetch the full market listing.
    pub async fn fetch_list(&self) -> Result<Vec<CoinSummary>, CoreError> {
        match self.provider.fetch_markets().await {
            Ok(coins) => Ok(coins),
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), error = %e, "Coin list fetch failed");
                Err(CoreError::ListFetch(Box::new(e)))
            }
        }
    }

    /// Fetch a coin's detail record and its price series.
    ///
    /// Both requests are created before either is awaited and are polled
    /// together, so their latencies overlap. The result is observed only once
    /// both have completed; a failure of either one fails the whole call.
    pub async fn fetch_detail(&self, id: &str) -> Result<(CoinDetail, PriceSeries), CoreError> {
        let detail = self.provider.fetch_coin_detail(id);
        let chart = self.provider.fetch_market_chart(id, self.chart_days);
        let (detail, chart) = futures::join!(detail, chart);

        match (detail, chart) {
            (Ok(detail), Ok(series)) => {
                tracing::debug!(%id, points = series.len(), "Fetched coin detail");
                Ok((detail, series))
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(provider = self.provider.name(), %id, error = %e, "Coin detail fetch failed");
                Err(CoreError::DetailFetch(Box::new(e)))
            }
        }
    }
}
