use serde::{Deserialize, Serialize};

/// A single data point for price chart rendering.
///
/// Generated by the core, rendered as-is by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,

    /// Axis label, e.g. "Jan 5, 02:30 PM" (UTC)
    pub label: String,

    /// Price in the quote currency
    pub price: f64,
}

/// Everything a line chart needs for one coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChart {
    /// e.g. "7-Day Price Trend for Bitcoin"
    pub title: String,

    /// e.g. "Bitcoin Price (USD)"
    pub dataset_label: String,

    pub points: Vec<ChartDataPoint>,

    /// Lowest finite price, for axis scaling
    pub min_price: Option<f64>,

    /// Highest finite price, for axis scaling
    pub max_price: Option<f64>,
}

impl PriceChart {
    /// An empty chart means "no price data available".
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
