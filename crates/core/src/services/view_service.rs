use crate::format::{self, ChangeTrend};
use crate::models::chart::PriceChart;
use crate::models::coin::{CoinDetail, CoinSummary};
use crate::models::favorites::Favorites;
use crate::models::route::Route;
use crate::models::sort::{SortColumn, SortDirective};
use crate::models::view::{CoinDetailView, CoinRow, SortHeader};

pub const ADD_FAVORITE_LABEL: &str = "Add to Favorites";
pub const REMOVE_FAVORITE_LABEL: &str = "Remove from Favorites";

/// Turns domain records into pre-formatted view models.
pub struct ViewService {
    currency: String,
}

impl ViewService {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_lowercase(),
        }
    }

    /// Table headers with the arrow on the active column.
    pub fn headers(&self, directive: &SortDirective) -> Vec<SortHeader> {
        SortColumn::ALL
            .iter()
            .map(|&column| SortHeader {
                column,
                label: match column {
                    SortColumn::CurrentPrice => {
                        format!("{column} ({})", self.currency.to_uppercase())
                    }
                    _ => column.to_string(),
                },
                indicator: directive.indicator_for(column).map(str::to_string),
            })
            .collect()
    }

    pub fn rows(&self, coins: &[&CoinSummary], favorites: &Favorites) -> Vec<CoinRow> {
        coins.iter().map(|coin| self.row(coin, favorites)).collect()
    }

    pub fn row(&self, coin: &CoinSummary, favorites: &Favorites) -> CoinRow {
        CoinRow {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            price_text: format::format_price(coin.current_price, &self.currency),
            change_text: format::format_change(coin.price_change_percentage_24h),
            trend: ChangeTrend::of(coin.price_change_percentage_24h),
            is_favorite: favorites.contains(&coin.id),
            route: Route::Coin(coin.id.clone()),
        }
    }

    pub fn detail(&self, detail: &CoinDetail, chart: PriceChart, is_favorite: bool) -> CoinDetailView {
        CoinDetailView {
            coin: detail.clone(),
            symbol: detail.symbol.to_uppercase(),
            price_text: format::format_optional_price(detail.current_price, &self.currency),
            market_cap_text: format::format_amount(detail.market_cap),
            total_supply_text: format::format_amount(detail.total_supply),
            change_text: format::format_change(detail.price_change_percentage_24h),
            trend: ChangeTrend::of(detail.price_change_percentage_24h),
            description: detail.description.clone(),
            chart,
            is_favorite,
            favorite_action: if is_favorite {
                REMOVE_FAVORITE_LABEL
            } else {
                ADD_FAVORITE_LABEL
            }
            .to_string(),
            back: Route::Home,
        }
    }
}
