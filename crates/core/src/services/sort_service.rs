use std::cmp::Ordering;

use crate::models::coin::CoinSummary;
use crate::models::favorites::Favorites;
use crate::models::sort::{SortColumn, SortDirection, SortDirective};
use super::search_service::SearchService;

/// Produces the display order of the coin tables.
///
/// Filter first, then a stable sort:
/// - `name` / `symbol`: case-insensitive text order
/// - `current_price` / `price_change_percentage_24h`: numeric order
/// - ties keep the filtered order
/// - absent (or NaN) numbers always go last, whatever the direction
pub struct SortService {
    search: SearchService,
}

impl SortService {
    pub fn new() -> Self {
        Self {
            search: SearchService::new(),
        }
    }

    /// Filtered and sorted view of `coins`.
    pub fn apply<'a>(
        &self,
        coins: &'a [CoinSummary],
        query: &str,
        directive: &SortDirective,
    ) -> Vec<&'a CoinSummary> {
        let mut rows = self.search.filter(coins, query);
        self.sort(&mut rows, directive);
        rows
    }

    /// Same as [`apply`](Self::apply), restricted to favorite coins.
    /// Favorites missing from `coins` are simply not listed.
    pub fn apply_favorites<'a>(
        &self,
        coins: &'a [CoinSummary],
        favorites: &Favorites,
        query: &str,
        directive: &SortDirective,
    ) -> Vec<&'a CoinSummary> {
        let mut rows: Vec<&CoinSummary> = self
            .search
            .filter(coins, query)
            .into_iter()
            .filter(|c| favorites.contains(&c.id))
            .collect();
        self.sort(&mut rows, directive);
        rows
    }

    /// Stable in-place sort. No column means no reordering.
    pub fn sort(&self, rows: &mut [&CoinSummary], directive: &SortDirective) {
        if let Some(column) = directive.column {
            rows.sort_by(|a, b| compare(a, b, column, directive.direction));
        }
    }
}

impl Default for SortService {
    fn default() -> Self {
        Self::new()
    }
}

/// Comparator behind every table sort.
pub fn compare(a: &CoinSummary, b: &CoinSummary, column: SortColumn, direction: SortDirection) -> Ordering {
    let directed = |ord: Ordering| match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    };

    match column {
        SortColumn::Name => directed(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortColumn::Symbol => directed(a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase())),
        SortColumn::CurrentPrice | SortColumn::PriceChange24h => {
            match (numeric_key(a, column), numeric_key(b, column)) {
                (Some(x), Some(y)) => directed(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
                // Absent values are placed after present ones in both directions.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

/// Numeric value of `column`, treating NaN as absent.
fn numeric_key(coin: &CoinSummary, column: SortColumn) -> Option<f64> {
    let value = match column {
        SortColumn::CurrentPrice => Some(coin.current_price),
        SortColumn::PriceChange24h => coin.price_change_percentage_24h,
        SortColumn::Name | SortColumn::Symbol => None,
    };
    value.filter(|v| !v.is_nan())
}
