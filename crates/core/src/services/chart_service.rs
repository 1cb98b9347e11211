use crate::models::chart::{ChartDataPoint, PriceChart};
use crate::models::price::PriceSeries;

/// Axis label format: "Jan 5, 02:30 PM".
pub const LABEL_FORMAT: &str = "%b %-d, %I:%M %p";

/// Generates chart-ready data sets from a coin's price series.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - One labelled point per observation, chronological
/// - Title and dataset label
/// - Min/max price for axis scaling
pub struct ChartService {
    days: u32,
    currency: String,
}

impl ChartService {
    /// `days` is the chart window, `currency` the quote currency code.
    pub fn new(days: u32, currency: &str) -> Self {
        Self {
            days,
            currency: currency.to_uppercase(),
        }
    }

    /// "7-Day Price Trend for Bitcoin"
    pub fn title(&self, coin_name: &str) -> String {
        format!("{}-Day Price Trend for {coin_name}", self.days)
    }

    /// "Bitcoin Price (USD)"
    pub fn dataset_label(&self, coin_name: &str) -> String {
        format!("{coin_name} Price ({})", self.currency)
    }

    /// Build the chart for `coin_name` from `series`.
    ///
    /// Points whose timestamp cannot be represented as a date are dropped.
    /// Labels are rendered in UTC so every client shows the same axis.
    pub fn build(&self, coin_name: &str, series: &PriceSeries) -> PriceChart {
        let points: Vec<ChartDataPoint> = series
            .points
            .iter()
            .filter_map(|p| {
                let at = p.datetime()?;
                Some(ChartDataPoint {
                    timestamp: p.timestamp,
                    label: at.format(LABEL_FORMAT).to_string(),
                    price: p.price,
                })
            })
            .collect();

        let bounds = series.price_bounds();

        PriceChart {
            title: self.title(coin_name),
            dataset_label: self.dataset_label(coin_name),
            points,
            min_price: bounds.map(|(lo, _)| lo),
            max_price: bounds.map(|(_, hi)| hi),
        }
    }
}
