use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::coin::{CoinDetail, CoinSummary, RawMarkup};
use crate::models::price::{PricePoint, PriceSeries};
use crate::models::settings::DashboardConfig;
use super::traits::MarketDataProvider;

const PROVIDER: &str = "CoinGecko";

/// Header carrying a CoinGecko demo key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Longest slice of an error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// CoinGecko public API provider.
///
/// - **Free**: no key required; an optional demo key raises rate limits.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}`, `/coins/{id}/market_chart`
/// - **Ids**: lowercase slugs like "bitcoin", "ethereum".
///
/// All prices are quoted in the configured `vs_currency`.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
    page: u32,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new(config: &DashboardConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.to_lowercase(),
            per_page: config.per_page,
            page: config.page,
            api_key: config.api_key.clone(),
        }
    }

    /// Listing url: one page ranked by market cap, no sparkline.
    pub fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false",
            self.base_url, self.vs_currency, self.per_page, self.page
        )
    }

    pub fn detail_url(&self, id: &str) -> Result<String, CoreError> {
        validate_coin_id(id)?;
        Ok(format!("{}/coins/{id}", self.base_url))
    }

    pub fn market_chart_url(&self, id: &str, days: u32) -> Result<String, CoreError> {
        validate_coin_id(id)?;
        Ok(format!(
            "{}/coins/{id}/market_chart?vs_currency={}&days={days}",
            self.base_url, self.vs_currency
        ))
    }

    /// GET `url` and return the body, mapping non-success statuses to errors.
    async fn get_text(&self, url: &str) -> Result<String, CoreError> {
        tracing::debug!(provider = PROVIDER, url, "Requesting");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CoreError::RateLimited {
                provider: PROVIDER.into(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status}: {body}"),
            });
        }

        Ok(response.text().await?)
    }
}

/// Coin ids go into url paths verbatim, so reject anything that would
/// change the path or query.
pub fn validate_coin_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() {
        return Err(CoreError::ValidationError("Coin id must not be empty".into()));
    }
    if id
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(CoreError::ValidationError(format!(
            "Invalid coin id '{id}': must not contain '/', '?', '#', '%' or whitespace"
        )));
    }
    Ok(())
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketEntry {
    id: String,
    name: String,
    symbol: String,
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Deserialize)]
struct DetailResponse {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<ImageLinks>,
    #[serde(default)]
    description: Option<HashMap<String, Option<String>>>,
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Deserialize)]
struct ImageLinks {
    #[serde(default)]
    small: Option<String>,
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    thumb: Option<String>,
}

#[derive(Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    total_supply: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    prices: Vec<(Option<f64>, Option<f64>)>,
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Parse a `/coins/markets` body.
///
/// The body must be a JSON array. Entries that are not well-formed coin
/// records (missing or non-string name/symbol, no price) are skipped and
/// logged; they never fail the whole listing.
pub fn parse_markets(body: &str) -> Result<Vec<CoinSummary>, CoreError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse market listing: {e}"),
    })?;

    let total = entries.len();
    let coins: Vec<CoinSummary> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<MarketEntry>(value) {
            Ok(entry) => match entry.current_price {
                Some(current_price) => Some(CoinSummary {
                    id: entry.id,
                    name: entry.name,
                    symbol: entry.symbol,
                    current_price,
                    price_change_percentage_24h: entry.price_change_percentage_24h,
                    market_cap: entry.market_cap,
                    image: entry.image,
                }),
                None => {
                    tracing::warn!(index, id = %entry.id, "Skipping market entry without a price");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed market entry");
                None
            }
        })
        .collect();

    if coins.len() < total {
        tracing::debug!(kept = coins.len(), total, "Dropped malformed market entries");
    }
    Ok(coins)
}

/// Parse a `/coins/{id}` body, picking market figures in `vs_currency`.
pub fn parse_coin_detail(body: &str, vs_currency: &str) -> Result<CoinDetail, CoreError> {
    let raw: DetailResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse coin detail: {e}"),
    })?;

    let currency = vs_currency.to_lowercase();
    let image_url = raw
        .image
        .and_then(|img| img.small.or(img.large).or(img.thumb))
        .filter(|url| !url.is_empty());
    let description = raw
        .description
        .and_then(|mut d| d.remove("en").flatten())
        .map(RawMarkup::new)
        .filter(|d| !d.is_blank());

    let (current_price, market_cap, total_supply, change) = match raw.market_data {
        Some(md) => (
            md.current_price.get(&currency).copied().flatten(),
            md.market_cap.get(&currency).copied().flatten(),
            md.total_supply,
            md.price_change_percentage_24h,
        ),
        None => (None, None, None, None),
    };

    Ok(CoinDetail {
        id: raw.id,
        name: raw.name,
        symbol: raw.symbol,
        image_url,
        description,
        current_price,
        market_cap,
        total_supply,
        price_change_percentage_24h: change,
    })
}

/// Parse a `/coins/{id}/market_chart` body into a chronological series.
/// Pairs with a missing or non-finite member are dropped.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries, CoreError> {
    let raw: MarketChartResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse market chart: {e}"),
    })?;

    let points = raw
        .prices
        .into_iter()
        .filter_map(|(ts, price)| {
            let (ts, price) = (ts?, price?);
            (ts.is_finite() && price.is_finite()).then(|| PricePoint::new(ts as i64, price))
        })
        .collect();

    Ok(PriceSeries::new(points))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_markets(&self) -> Result<Vec<CoinSummary>, CoreError> {
        let body = self.get_text(&self.markets_url()).await?;
        let coins = parse_markets(&body)?;
        tracing::debug!(count = coins.len(), "Fetched market listing");
        Ok(coins)
    }

    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, CoreError> {
        let url = self.detail_url(id)?;
        let body = self.get_text(&url).await?;
        parse_coin_detail(&body, &self.vs_currency)
    }

    async fn fetch_market_chart(&self, id: &str, days: u32) -> Result<PriceSeries, CoreError> {
        let url = self.market_chart_url(id, days)?;
        let body = self.get_text(&url).await?;
        let series = parse_market_chart(&body)?;
        tracing::debug!(%id, days, points = series.len(), "Fetched market chart");
        Ok(series)
    }
}
