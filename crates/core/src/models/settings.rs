use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Runtime configuration of the dashboard.
///
/// Every field has a default, so a partial JSON document (or none at all)
/// is enough to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base url of the CoinGecko-compatible API, without trailing slash.
    pub api_base_url: String,

    /// Quote currency for every price (e.g., "usd").
    pub vs_currency: String,

    /// Number of coins in the market listing.
    pub per_page: u32,

    /// Listing page, 1-based.
    pub page: u32,

    /// Window of the detail price chart, in days.
    pub chart_days: u32,

    /// Key under which the favorites array is stored.
    pub favorites_key: String,

    /// Per-request timeout. Ignored on wasm32, where the browser decides.
    pub request_timeout_secs: u64,

    /// Optional CoinGecko demo API key, sent as a header.
    pub api_key: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "usd".to_string(),
            per_page: 100,
            page: 1,
            chart_days: 7,
            favorites_key: "cryptoFavorites".to_string(),
            request_timeout_secs: 30,
            api_key: None,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce unusable requests.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::ValidationError("api_base_url must not be empty".into()));
        }
        let currency = &self.vs_currency;
        if currency.is_empty() || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid vs_currency '{}': must be ASCII letters (e.g., usd, eur)",
                self.vs_currency
            )));
        }
        if self.per_page == 0 || self.per_page > 250 {
            return Err(CoreError::ValidationError(format!(
                "per_page must be within 1..=250, got {}",
                self.per_page
            )));
        }
        if self.page == 0 {
            return Err(CoreError::ValidationError("page is 1-based, got 0".into()));
        }
        if self.chart_days == 0 {
            return Err(CoreError::ValidationError("chart_days must be at least 1".into()));
        }
        if self.favorites_key.is_empty() {
            return Err(CoreError::ValidationError("favorites_key must not be empty".into()));
        }
        Ok(())
    }

    /// Quote currency upper-cased for labels ("USD").
    pub fn currency_label(&self) -> String {
        self.vs_currency.to_uppercase()
    }
}
