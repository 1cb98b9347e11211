// ═══════════════════════════════════════════════════════════════════
// Service Tests — SearchService, SuggestionBox, SortService,
// ChartService, ViewService, formatting, MarketDataService
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cryptostats_core::errors::CoreError;
use cryptostats_core::format::{self, ChangeTrend};
use cryptostats_core::models::coin::{CoinDetail, CoinSummary, RawMarkup};
use cryptostats_core::models::favorites::Favorites;
use cryptostats_core::models::price::{PricePoint, PriceSeries};
use cryptostats_core::models::route::Route;
use cryptostats_core::models::sort::{SortColumn, SortDirection, SortDirective};
use cryptostats_core::providers::traits::MarketDataProvider;
use cryptostats_core::services::chart_service::ChartService;
use cryptostats_core::services::market_service::MarketDataService;
use cryptostats_core::services::search_service::{SearchService, SuggestionBox, SuggestionState};
use cryptostats_core::services::sort_service::{compare, SortService};
use cryptostats_core::services::view_service::{ViewService, ADD_FAVORITE_LABEL, REMOVE_FAVORITE_LABEL};

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

fn alpha() -> CoinSummary {
    CoinSummary::new("a", "Alpha", "ALP", 10.0, Some(5.0))
}

fn beta() -> CoinSummary {
    CoinSummary::new("b", "Beta", "BET", 5.0, Some(-2.0))
}

fn market() -> Vec<CoinSummary> {
    vec![
        CoinSummary::new("bitcoin", "Bitcoin", "btc", 64000.0, Some(1.2)),
        CoinSummary::new("ethereum", "Ethereum", "eth", 3100.0, Some(-0.8)),
        CoinSummary::new("tether", "Tether", "usdt", 1.0, Some(0.0)),
        CoinSummary::new("binancecoin", "BNB", "bnb", 580.0, None),
        CoinSummary::new("solana", "Solana", "sol", 145.0, Some(4.1)),
        CoinSummary::new("usd-coin", "USDC", "usdc", 1.0, Some(-0.01)),
        CoinSummary::new("wrapped-bitcoin", "Wrapped Bitcoin", "wbtc", 64000.0, Some(1.1)),
        CoinSummary::new("dogecoin", "Dogecoin", "doge", 0.15, None),
    ]
}

fn ids(coins: &[&CoinSummary]) -> Vec<String> {
    coins.iter().map(|c| c.id.clone()).collect()
}

fn is_subsequence(sub: &[&CoinSummary], full: &[CoinSummary]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| std::ptr::eq(f, *s)))
}

// ═══════════════════════════════════════════════════════════════════
// Mock Providers
// ═══════════════════════════════════════════════════════════════════

/// Serves canned data and counts calls.
struct MockProvider {
    coins: Vec<CoinSummary>,
    detail_fails: bool,
    chart_fails: bool,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            coins: vec![alpha(), beta()],
            detail_fails: false,
            chart_fails: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

fn detail_for(id: &str) -> CoinDetail {
    CoinDetail {
        id: id.to_string(),
        name: "Alpha".into(),
        symbol: "alp".into(),
        image_url: None,
        description: Some(RawMarkup::new("<b>Alpha</b> coin")),
        current_price: Some(10.0),
        market_cap: Some(1_000_000.0),
        total_supply: None,
        price_change_percentage_24h: Some(5.0),
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch_markets(&self) -> Result<Vec<CoinSummary>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.coins.clone())
    }

    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.detail_fails {
            return Err(CoreError::Api {
                provider: "Mock".into(),
                message: "HTTP 404 Not Found".into(),
            });
        }
        Ok(detail_for(id))
    }

    async fn fetch_market_chart(&self, _id: &str, days: u32) -> Result<PriceSeries, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.chart_fails {
            return Err(CoreError::RateLimited {
                provider: "Mock".into(),
            });
        }
        Ok(PriceSeries::new(
            (0..days as i64)
                .map(|d| PricePoint::new(1_704_067_200_000 + d * 86_400_000, 10.0 + d as f64))
                .collect(),
        ))
    }
}

/// Always fails with a network error.
struct FailingProvider;

#[async_trait]
impl MarketDataProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn fetch_markets(&self) -> Result<Vec<CoinSummary>, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn fetch_coin_detail(&self, _id: &str) -> Result<CoinDetail, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn fetch_market_chart(&self, _id: &str, _days: u32) -> Result<PriceSeries, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// SearchService
// ═══════════════════════════════════════════════════════════════════

mod search {
    use super::*;

    #[test]
    fn empty_query_is_identity() {
        let coins = market();
        let out = SearchService::new().filter(&coins, "");
        assert_eq!(out.len(), coins.len());
        assert!(out.iter().zip(&coins).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn matches_symbol_case_insensitively() {
        let coins = vec![alpha(), beta()];
        let out = SearchService::new().filter(&coins, "bet");
        assert_eq!(ids(&out), vec!["b"]);
    }

    #[test]
    fn matches_name_or_symbol() {
        let coins = market();
        let s = SearchService::new();
        assert_eq!(ids(&s.filter(&coins, "BITCOIN")), vec!["bitcoin", "wrapped-bitcoin"]);
        assert_eq!(ids(&s.filter(&coins, "usd")), vec!["tether", "usd-coin"]);
        assert!(s.filter(&coins, "xyz").is_empty());
    }

    #[test]
    fn result_is_order_preserving_subsequence() {
        let coins = market();
        let s = SearchService::new();
        for q in ["", "b", "c", "coin", "O", "sol", "zzz", " "] {
            let out = s.filter(&coins, q);
            assert!(is_subsequence(&out, &coins), "query {q:?}");
        }
    }

    #[test]
    fn empty_collection() {
        assert!(SearchService::new().filter(&[], "btc").is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// SuggestionBox
// ═══════════════════════════════════════════════════════════════════

mod suggestions {
    use super::*;

    #[test]
    fn starts_closed() {
        let b = SuggestionBox::new();
        assert_eq!(b.state(), SuggestionState::Closed);
        assert!(!b.is_open());
        assert_eq!(b.highlighted(), None);
    }

    #[test]
    fn typing_opens_without_highlight() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        assert_eq!(b.state(), SuggestionState::Open { highlighted: None });
    }

    #[test]
    fn focus_opens() {
        let mut b = SuggestionBox::new();
        b.focus();
        assert!(b.is_open());
    }

    #[test]
    fn down_moves_and_clamps() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(3);
        assert_eq!(b.highlighted(), Some(0));
        b.move_down(3);
        b.move_down(3);
        b.move_down(3);
        assert_eq!(b.highlighted(), Some(2));
    }

    #[test]
    fn up_stops_at_first() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(3);
        b.move_down(3);
        b.move_up(3);
        assert_eq!(b.highlighted(), Some(0));
        b.move_up(3);
        assert_eq!(b.highlighted(), Some(0));
    }

    #[test]
    fn up_from_none_goes_to_first() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_up(4);
        assert_eq!(b.highlighted(), Some(0));
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(0);
        b.move_up(0);
        assert_eq!(b.highlighted(), None);
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut b = SuggestionBox::new();
        b.move_down(5);
        assert_eq!(b.state(), SuggestionState::Closed);
    }

    #[test]
    fn highlight_stays_in_range_under_any_sequence() {
        for len in 0..5usize {
            let mut b = SuggestionBox::new();
            b.text_changed();
            // Deterministic pseudo-random walk of ups and downs.
            let mut seed: u32 = 0x9e37_79b9 ^ len as u32;
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                if seed % 2 == 0 {
                    b.move_down(len);
                } else {
                    b.move_up(len);
                }
                match b.highlighted() {
                    None => assert_eq!(len, 0),
                    Some(i) => assert!(i < len, "len {len}, index {i}"),
                }
            }
        }
    }

    #[test]
    fn typing_resets_highlight() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(2);
        b.text_changed();
        assert_eq!(b.highlighted(), None);
    }

    #[test]
    fn enter_with_highlight_selects_and_closes() {
        let coins = vec![alpha(), beta()];
        let list: Vec<&CoinSummary> = coins.iter().collect();
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(list.len());
        b.move_down(list.len());
        let picked = b.confirm(&list).unwrap();
        assert_eq!(picked.id, "b");
        assert_eq!(picked.name, "Beta");
        assert!(!b.is_open());
    }

    #[test]
    fn enter_without_highlight_only_closes() {
        let coins = vec![alpha()];
        let list: Vec<&CoinSummary> = coins.iter().collect();
        let mut b = SuggestionBox::new();
        b.text_changed();
        assert!(b.confirm(&list).is_none());
        assert!(!b.is_open());
    }

    #[test]
    fn clear_highlight_keeps_open_state() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(3);
        b.clear_highlight();
        assert_eq!(b.state(), SuggestionState::Open { highlighted: None });

        let mut closed = SuggestionBox::new();
        closed.clear_highlight();
        assert_eq!(closed.state(), SuggestionState::Closed);
    }

    #[test]
    fn escape_and_outside_close() {
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.cancel();
        assert!(!b.is_open());

        b.focus();
        b.outside_interaction();
        assert!(!b.is_open());
    }

    #[test]
    fn pointer_select_ignores_highlight() {
        let coins = vec![alpha(), beta()];
        let list: Vec<&CoinSummary> = coins.iter().collect();
        let mut b = SuggestionBox::new();
        b.text_changed();
        b.move_down(2);
        let picked = b.select(&list, 1).unwrap();
        assert_eq!(picked.id, "b");
        assert!(!b.is_open());
    }

    #[test]
    fn pointer_select_out_of_range() {
        let coins = vec![alpha()];
        let list: Vec<&CoinSummary> = coins.iter().collect();
        let mut b = SuggestionBox::new();
        b.text_changed();
        assert!(b.select(&list, 5).is_none());
        assert!(b.is_open());
    }
}

// ═══════════════════════════════════════════════════════════════════
// SortService
// ═══════════════════════════════════════════════════════════════════

mod sort {
    use super::*;

    fn sorted(coins: &[CoinSummary], column: SortColumn, direction: SortDirection) -> Vec<String> {
        ids(&SortService::new().apply(coins, "", &SortDirective::by(column, direction)))
    }

    #[test]
    fn price_ascending_scenario() {
        let coins = vec![alpha(), beta()];
        let out = SortService::new().apply(
            &coins,
            "",
            &SortDirective::by(SortColumn::CurrentPrice, SortDirection::Ascending),
        );
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn no_column_keeps_filtered_order() {
        let coins = market();
        let out = SortService::new().apply(&coins, "", &SortDirective::none());
        assert_eq!(ids(&out), coins.iter().map(|c| c.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn name_is_case_insensitive() {
        let coins = vec![
            CoinSummary::new("1", "bravo", "b", 1.0, None),
            CoinSummary::new("2", "Alpha", "a", 1.0, None),
            CoinSummary::new("3", "charlie", "c", 1.0, None),
        ];
        assert_eq!(sorted(&coins, SortColumn::Name, SortDirection::Ascending), vec!["2", "1", "3"]);
        assert_eq!(sorted(&coins, SortColumn::Name, SortDirection::Descending), vec!["3", "1", "2"]);
    }

    #[test]
    fn symbol_sort() {
        let coins = market();
        let out = sorted(&coins, SortColumn::Symbol, SortDirection::Ascending);
        assert_eq!(out.first().map(String::as_str), Some("binancecoin"));
        assert_eq!(out.last().map(String::as_str), Some("wrapped-bitcoin"));
    }

    #[test]
    fn ties_keep_filtered_order() {
        let coins = market();
        let out = sorted(&coins, SortColumn::CurrentPrice, SortDirection::Ascending);
        let tether = out.iter().position(|id| id == "tether").unwrap();
        let usdc = out.iter().position(|id| id == "usd-coin").unwrap();
        assert_eq!(usdc, tether + 1);

        let out = sorted(&coins, SortColumn::CurrentPrice, SortDirection::Descending);
        assert_eq!(&out[..2], &["bitcoin", "wrapped-bitcoin"]);
    }

    #[test]
    fn absent_change_sorts_last_both_ways() {
        let coins = market();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let out = sorted(&coins, SortColumn::PriceChange24h, direction);
            assert_eq!(&out[out.len() - 2..], &["binancecoin", "dogecoin"], "{direction:?}");
        }
    }

    #[test]
    fn nan_treated_as_absent() {
        let coins = vec![
            CoinSummary::new("nan", "N", "n", f64::NAN, None),
            CoinSummary::new("one", "O", "o", 1.0, None),
        ];
        assert_eq!(
            sorted(&coins, SortColumn::CurrentPrice, SortDirection::Ascending),
            vec!["one", "nan"]
        );
        assert_eq!(
            sorted(&coins, SortColumn::CurrentPrice, SortDirection::Descending),
            vec!["one", "nan"]
        );
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let coins = market();
        let service = SortService::new();
        for column in SortColumn::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let directive = SortDirective::by(column, direction);
                let mut once = service.apply(&coins, "", &directive);
                let first = ids(&once);
                service.sort(&mut once, &directive);
                assert_eq!(ids(&once), first, "{column:?} {direction:?}");
            }
        }
    }

    #[test]
    fn flipping_direction_reverses_distinct_values() {
        let coins = vec![
            CoinSummary::new("1", "One", "a", 3.0, Some(1.0)),
            CoinSummary::new("2", "Two", "b", 1.0, Some(-4.0)),
            CoinSummary::new("3", "Three", "c", 2.0, Some(9.0)),
            CoinSummary::new("4", "Four", "d", 5.0, Some(0.5)),
        ];
        for column in SortColumn::ALL {
            let asc = sorted(&coins, column, SortDirection::Ascending);
            let mut desc = sorted(&coins, column, SortDirection::Descending);
            desc.reverse();
            assert_eq!(asc, desc, "{column:?}");
        }
    }

    #[test]
    fn compare_directly() {
        let (a, b) = (alpha(), beta());
        assert_eq!(
            compare(&a, &b, SortColumn::CurrentPrice, SortDirection::Ascending),
            std::cmp::Ordering::Greater
        );
        assert_eq!(
            compare(&a, &b, SortColumn::CurrentPrice, SortDirection::Descending),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn filter_then_sort() {
        let coins = market();
        let out = SortService::new().apply(
            &coins,
            "bitcoin",
            &SortDirective::by(SortColumn::Name, SortDirection::Descending),
        );
        assert_eq!(ids(&out), vec!["wrapped-bitcoin", "bitcoin"]);
    }

    #[test]
    fn favorites_subset() {
        let coins = market();
        let favorites: Favorites = ["solana", "bitcoin", "delisted-coin"].into_iter().collect();
        let service = SortService::new();

        let out = service.apply_favorites(&coins, &favorites, "", &SortDirective::none());
        assert_eq!(ids(&out), vec!["bitcoin", "solana"]);

        let out = service.apply_favorites(
            &coins,
            &favorites,
            "",
            &SortDirective::by(SortColumn::CurrentPrice, SortDirection::Ascending),
        );
        assert_eq!(ids(&out), vec!["solana", "bitcoin"]);

        let out = service.apply_favorites(&coins, &favorites, "sol", &SortDirective::none());
        assert_eq!(ids(&out), vec!["solana"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn title_and_label() {
        let s = ChartService::new(7, "usd");
        assert_eq!(s.title("Bitcoin"), "7-Day Price Trend for Bitcoin");
        assert_eq!(s.dataset_label("Bitcoin"), "Bitcoin Price (USD)");
    }

    #[test]
    fn builds_labelled_points() {
        let series = PriceSeries::new(vec![
            PricePoint::new(1_704_067_200_000, 42000.0), // 2024-01-01 00:00 UTC
            PricePoint::new(1_704_121_200_000, 42500.0), // 2024-01-01 15:00 UTC
            PricePoint::new(1_704_500_000_000, 41000.0), // 2024-01-06 00:13 UTC
        ]);
        let chart = ChartService::new(7, "usd").build("Bitcoin", &series);
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[0].label, "Jan 1, 12:00 AM");
        assert_eq!(chart.points[1].label, "Jan 1, 03:00 PM");
        assert_eq!(chart.points[2].label, "Jan 6, 12:13 AM");
        assert_eq!(chart.points[1].price, 42500.0);
        assert_eq!(chart.min_price, Some(41000.0));
        assert_eq!(chart.max_price, Some(42500.0));
        assert_eq!(chart.title, "7-Day Price Trend for Bitcoin");
        assert!(!chart.is_empty());
    }

    #[test]
    fn empty_series_gives_empty_chart() {
        let chart = ChartService::new(7, "usd").build("Bitcoin", &PriceSeries::default());
        assert!(chart.is_empty());
        assert!(chart.min_price.is_none());
        assert!(chart.max_price.is_none());
    }

    #[test]
    fn unrepresentable_timestamps_dropped() {
        let series = PriceSeries::new(vec![
            PricePoint::new(1_704_067_200_000, 1.0),
            PricePoint::new(i64::MAX, 2.0),
        ]);
        let chart = ChartService::new(1, "eur").build("X", &series);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.dataset_label, "X Price (EUR)");
        assert_eq!(chart.title, "1-Day Price Trend for X");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn group_thousands() {
        assert_eq!(format::group_thousands("0"), "0");
        assert_eq!(format::group_thousands("999"), "999");
        assert_eq!(format::group_thousands("1000"), "1,000");
        assert_eq!(format::group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn price_numbers() {
        assert_eq!(format::format_price_number(64000.5), "64,000.50");
        assert_eq!(format::format_price_number(1.0), "1.00");
        assert_eq!(format::format_price_number(0.0), "0.00");
        assert_eq!(format::format_price_number(0.15), "0.15");
        assert_eq!(format::format_price_number(0.00001234), "0.00001234");
        assert_eq!(format::format_price_number(0.5), "0.50");
        assert_eq!(format::format_price_number(0.123456789), "0.12345679");
    }

    #[test]
    fn tiny_prices_keep_significant_digits() {
        assert_eq!(format::format_price_number(0.000000001234), "0.000000001234");
        assert_eq!(format::format_price(0.000000001234, "usd"), "$0.000000001234");
        assert_eq!(format::format_price_number(0.1), "0.10");
        assert_eq!(format::format_price_number(-0.0000456), "-0.0000456");
        assert_eq!(format::format_price_number(1e-30), "0.00");
        assert_eq!(format::format_price_number(f64::NAN), "N/A");
    }

    #[test]
    fn price_with_currency() {
        assert_eq!(format::format_price(1234.5, "usd"), "$1,234.50");
        assert_eq!(format::format_price(1234.5, "USD"), "$1,234.50");
        assert_eq!(format::format_price(-3.0, "usd"), "-$3.00");
        assert_eq!(format::format_price(1234.5, "eur"), "1,234.50 EUR");
        assert_eq!(format::format_optional_price(None, "usd"), "N/A");
    }

    #[test]
    fn amounts() {
        assert_eq!(format::format_amount(Some(21_000_000.0)), "21,000,000");
        assert_eq!(format::format_amount(Some(1_234.6)), "1,235");
        assert_eq!(format::format_amount(None), "N/A");
        assert_eq!(format::format_amount(Some(f64::INFINITY)), "N/A");
    }

    #[test]
    fn changes() {
        assert_eq!(format::format_change(Some(5.0)), "5.00%");
        assert_eq!(format::format_change(Some(-2.5)), "-2.50%");
        assert_eq!(format::format_change(Some(0.0)), "0.00%");
        assert_eq!(format::format_change(None), format::NOT_AVAILABLE);
    }

    #[test]
    fn trends() {
        assert_eq!(ChangeTrend::of(Some(0.0)), ChangeTrend::Up);
        assert_eq!(ChangeTrend::of(Some(1.0)), ChangeTrend::Up);
        assert_eq!(ChangeTrend::of(Some(-0.1)), ChangeTrend::Down);
        assert_eq!(ChangeTrend::of(None), ChangeTrend::Unknown);
        assert_eq!(ChangeTrend::of(Some(f64::NAN)), ChangeTrend::Unknown);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ViewService
// ═══════════════════════════════════════════════════════════════════

mod view {
    use super::*;

    #[test]
    fn headers_show_active_arrow() {
        let s = ViewService::new("usd");
        let headers = s.headers(&SortDirective::by(SortColumn::CurrentPrice, SortDirection::Descending));
        let labels: Vec<&str> = headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Name", "Symbol", "Price (USD)", "24h Change (%)"]);
        assert_eq!(headers[2].indicator.as_deref(), Some("▼"));
        assert!(headers[0].indicator.is_none());
    }

    #[test]
    fn rows_are_preformatted() {
        let s = ViewService::new("usd");
        let coins = vec![alpha(), beta()];
        let favorites: Favorites = ["b"].into_iter().collect();
        let refs: Vec<&CoinSummary> = coins.iter().collect();
        let rows = s.rows(&refs, &favorites);

        assert_eq!(rows[0].symbol, "ALP");
        assert_eq!(rows[0].price_text, "$10.00");
        assert_eq!(rows[0].change_text, "5.00%");
        assert_eq!(rows[0].trend, ChangeTrend::Up);
        assert!(!rows[0].is_favorite);
        assert_eq!(rows[0].route, Route::Coin("a".into()));

        assert_eq!(rows[1].trend, ChangeTrend::Down);
        assert!(rows[1].is_favorite);
    }

    #[test]
    fn detail_view() {
        let s = ViewService::new("usd");
        let chart = ChartService::new(7, "usd").build("Alpha", &PriceSeries::default());
        let view = s.detail(&detail_for("a"), chart, false);
        assert_eq!(view.symbol, "ALP");
        assert_eq!(view.price_text, "$10.00");
        assert_eq!(view.market_cap_text, "1,000,000");
        assert_eq!(view.total_supply_text, "N/A");
        assert_eq!(view.change_text, "5.00%");
        assert_eq!(view.favorite_action, ADD_FAVORITE_LABEL);
        assert_eq!(view.back, Route::Home);
        assert_eq!(view.description.unwrap().as_raw(), "<b>Alpha</b> coin");

        let chart = ChartService::new(7, "usd").build("Alpha", &PriceSeries::default());
        let view = s.detail(&detail_for("a"), chart, true);
        assert_eq!(view.favorite_action, REMOVE_FAVORITE_LABEL);
    }
}

// ═══════════════════════════════════════════════════════════════════
// MarketDataService
// ═══════════════════════════════════════════════════════════════════

mod market_service {
    use super::*;

    #[tokio::test]
    async fn list_success() {
        let service = MarketDataService::new(Box::new(MockProvider::new()), 7);
        let coins = service.fetch_list().await.unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(service.provider_name(), "Mock");
        assert_eq!(service.chart_days(), 7);
    }

    #[tokio::test]
    async fn list_failure_is_wrapped() {
        let service = MarketDataService::new(Box::new(FailingProvider), 7);
        let err = service.fetch_list().await.unwrap_err();
        assert!(matches!(err, CoreError::ListFetch(_)));
        assert!(matches!(err.root_cause(), CoreError::Network(_)));
    }

    #[tokio::test]
    async fn detail_success_issues_both_requests() {
        let provider = MockProvider::new();
        let calls = Arc::clone(&provider.calls);
        let service = MarketDataService::new(Box::new(provider), 7);

        let (detail, series) = service.fetch_detail("a").await.unwrap();
        assert_eq!(detail.id, "a");
        assert_eq!(series.len(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn chart_failure_fails_whole_detail() {
        let mut provider = MockProvider::new();
        provider.chart_fails = true;
        let service = MarketDataService::new(Box::new(provider), 7);

        let err = service.fetch_detail("a").await.unwrap_err();
        assert!(matches!(err, CoreError::DetailFetch(_)));
        assert!(matches!(err.root_cause(), CoreError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn detail_failure_fails_whole_detail() {
        let mut provider = MockProvider::new();
        provider.detail_fails = true;
        let calls = Arc::clone(&provider.calls);
        let service = MarketDataService::new(Box::new(provider), 7);

        let err = service.fetch_detail("a").await.unwrap_err();
        assert!(matches!(err, CoreError::DetailFetch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
