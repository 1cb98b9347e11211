use serde::{Deserialize, Serialize};

use crate::format::ChangeTrend;

use super::chart::PriceChart;
use super::coin::{CoinDetail, CoinId, RawMarkup};
use super::route::Route;
use super::sort::SortColumn;

/// Progress of whatever data a view depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadState<T> {
    Loading,
    /// Static user-facing message plus the route that leads back to a
    /// known-good view.
    Failed { message: String, back: Route },
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// One line of the coin table, pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRow {
    pub id: CoinId,
    pub name: String,
    /// Upper-cased for display.
    pub symbol: String,
    pub price_text: String,
    pub change_text: String,
    pub trend: ChangeTrend,
    pub is_favorite: bool,
    /// Where a click on the row leads.
    pub route: Route,
}

/// Column header with its current sort arrow, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortHeader {
    pub column: SortColumn,
    pub label: String,
    pub indicator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinListView {
    pub headers: Vec<SortHeader>,
    pub rows: Vec<CoinRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesView {
    pub headers: Vec<SortHeader>,
    /// Favorites left after the search query and sort.
    pub rows: Vec<CoinRow>,
    /// Some favorite is present in the coin list, query aside.
    pub has_favorites: bool,
}

impl FavoritesView {
    /// "You don't have any favorites yet."
    pub fn is_empty(&self) -> bool {
        !self.has_favorites
    }

    /// Favorites exist but none match the current query.
    pub fn no_matches(&self) -> bool {
        self.has_favorites && self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetailView {
    pub coin: CoinDetail,
    /// Upper-cased ticker.
    pub symbol: String,
    pub price_text: String,
    pub market_cap_text: String,
    pub total_supply_text: String,
    pub change_text: String,
    pub trend: ChangeTrend,
    /// Raw markup, sanitize before display. `None` means "no description available".
    pub description: Option<RawMarkup>,
    /// Empty chart means "no price data available".
    pub chart: PriceChart,
    pub is_favorite: bool,
    /// "Add to Favorites" or "Remove from Favorites".
    pub favorite_action: String,
    pub back: Route,
}

/// Whatever the active route renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum View {
    AllCoins(LoadState<CoinListView>),
    CoinDetail(LoadState<CoinDetailView>),
    Favorites(LoadState<FavoritesView>),
    NotFound { path: String, back: Route },
}

/// One entry of the search dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub highlighted: bool,
}

/// State of the header search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchView {
    pub query: String,
    /// Dropdown is shown (open and the query is non-empty).
    pub visible: bool,
    pub suggestions: Vec<SuggestionItem>,
    /// Dropdown is shown but nothing matches: render "No results found.".
    pub no_results: bool,
}
