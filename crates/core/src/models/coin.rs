use serde::{Deserialize, Serialize};

/// Stable coin identifier as issued by the market data source (e.g. "bitcoin").
pub type CoinId = String;

/// One row of the market listing.
///
/// Produced by the list fetch and replaced wholesale on every refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: CoinId,
    pub name: String,
    /// Lowercase ticker as delivered by the API (e.g. "btc").
    pub symbol: String,
    /// Price in the configured quote currency.
    pub current_price: f64,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl CoinSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: f64,
        price_change_percentage_24h: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            current_price,
            price_change_percentage_24h,
            market_cap: None,
            image: None,
        }
    }

    /// Case-insensitive substring match against name OR symbol.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// Text that may contain HTML straight from the data source.
///
/// The core never interprets it. Renderers must sanitize before display,
/// or call [`RawMarkup::strip_tags`] for a plain-text rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMarkup(String);

impl RawMarkup {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The unsanitized markup.
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Drop everything between `<` and `>` and decode the handful of
    /// entities the data source actually emits.
    pub fn strip_tags(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_tag = false;
        for c in self.0.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ")
    }
}

/// Full record for a single coin, flattened from the detail endpoint.
///
/// Not reconciled with [`CoinSummary`]; both can exist for the same id with
/// slightly different numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image_url: Option<String>,
    /// Raw markup, sanitize before display.
    pub description: Option<RawMarkup>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_supply: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}
