pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::{
    chart::PriceChart,
    coin::{CoinDetail, CoinId, CoinSummary},
    favorites::Favorites,
    price::PriceSeries,
    request::{DetailRequest, FetchRequest, ListRequest},
    route::Route,
    settings::DashboardConfig,
    sort::{SortColumn, SortDirective},
    view::{CoinListView, FavoritesView, LoadState, SearchView, SuggestionItem, View},
};
use providers::{coingecko::CoinGeckoProvider, traits::MarketDataProvider};
use services::{
    chart_service::ChartService,
    market_service::MarketDataService,
    search_service::{SearchKey, SearchService, Selection, SuggestionBox},
    sort_service::SortService,
    view_service::ViewService,
};
use storage::{kv::KeyValueStore, manager::FavoritesStore};

use errors::CoreError;

/// Progress of the coin list fetch.
#[derive(Debug, Clone, PartialEq)]
enum ListStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Progress of the detail fetch for the coin view.
#[derive(Debug, Clone)]
enum DetailState {
    Idle,
    Loading(DetailRequest),
    Ready {
        id: CoinId,
        detail: CoinDetail,
        chart: PriceChart,
    },
    Failed {
        id: CoinId,
        message: String,
    },
}

/// Main entry point for the CryptoStats core library.
///
/// The application owns exactly one of these and hands it to whichever view
/// is active. It holds the favorites, the coin list, the search query, the
/// suggestion dropdown, the sort directive, the current route and the detail
/// fetch state, plus all services needed to operate on them.
#[must_use]
pub struct CryptoDashboard<S: KeyValueStore> {
    config: DashboardConfig,
    market: Arc<MarketDataService>,
    favorites_store: FavoritesStore<S>,
    favorites: Favorites,
    coins: Vec<CoinSummary>,
    list_status: ListStatus,
    query: String,
    suggestions: SuggestionBox,
    sort: SortDirective,
    route: Route,
    detail: DetailState,
    search_service: SearchService,
    sort_service: SortService,
    chart_service: ChartService,
    view_service: ViewService,
    /// Ticket of the list fetch whose result is still wanted.
    list_ticket: Option<u64>,
    next_ticket: u64,
}

impl<S: KeyValueStore> std::fmt::Debug for CryptoDashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("provider", &self.market.provider_name())
            .field("coins", &self.coins.len())
            .field("favorites", &self.favorites.len())
            .field("route", &self.route)
            .field("query", &self.query)
            .field("sort", &self.sort)
            .finish()
    }
}

impl<S: KeyValueStore> CryptoDashboard<S> {
    /// Create a dashboard talking to CoinGecko, loading favorites from `store`.
    pub fn new(config: DashboardConfig, store: S) -> Result<Self, CoreError> {
        let provider = CoinGeckoProvider::new(&config);
        Self::with_provider(config, store, Box::new(provider))
    }

    /// Create a dashboard with a custom market data provider.
    pub fn with_provider(
        config: DashboardConfig,
        store: S,
        provider: Box<dyn MarketDataProvider>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let favorites_store = FavoritesStore::new(store, config.favorites_key.clone());
        let favorites = favorites_store.load();
        let market = Arc::new(MarketDataService::new(provider, config.chart_days));
        let chart_service = ChartService::new(config.chart_days, &config.vs_currency);
        let view_service = ViewService::new(&config.vs_currency);

        Ok(Self {
            config,
            market,
            favorites_store,
            favorites,
            coins: Vec::new(),
            list_status: ListStatus::Loading,
            query: String::new(),
            suggestions: SuggestionBox::new(),
            sort: SortDirective::none(),
            route: Route::Home,
            detail: DetailState::Idle,
            search_service: SearchService::new(),
            sort_service: SortService::new(),
            chart_service,
            view_service,
            list_ticket: None,
            next_ticket: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Shared handle to the fetcher, for running a fetch while the dashboard
    /// itself stays free to handle other events.
    #[must_use]
    pub fn market_service(&self) -> Arc<MarketDataService> {
        Arc::clone(&self.market)
    }

    /// Borrow the persistence layer.
    #[must_use]
    pub fn favorites_store(&self) -> &FavoritesStore<S> {
        &self.favorites_store
    }

    // ── Coin List ───────────────────────────────────────────────────

    /// Mark the list as loading and hand out a ticket for the fetch.
    /// Any earlier list ticket becomes stale.
    pub fn begin_list_fetch(&mut self) -> ListRequest {
        let ticket = self.issue_ticket();
        self.list_ticket = Some(ticket);
        self.list_status = ListStatus::Loading;
        ListRequest { ticket }
    }

    /// Apply a list fetch result. Success replaces the collection wholesale;
    /// failure empties it and records the user-facing message.
    /// Returns `false` (and changes nothing) if the request is stale.
    pub fn apply_list(
        &mut self,
        request: ListRequest,
        result: Result<Vec<CoinSummary>, CoreError>,
    ) -> bool {
        if self.list_ticket != Some(request.ticket) {
            tracing::debug!(ticket = request.ticket, "Discarding stale coin list result");
            return false;
        }
        self.list_ticket = None;
        match result {
            Ok(coins) => {
                tracing::debug!(count = coins.len(), "Coin list loaded");
                self.coins = coins;
                self.list_status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Coin list unavailable");
                self.coins.clear();
                self.list_status = ListStatus::Failed(e.user_message().to_string());
            }
        }
        // Suggestions derive from the coins; an old highlight may be out of range.
        self.suggestions.clear_highlight();
        true
    }

    /// Fetch the coin list and apply it.
    pub async fn load_coins(&mut self) -> bool {
        let request = self.begin_list_fetch();
        let result = self.market.fetch_list().await;
        self.apply_list(request, result)
    }

    #[must_use]
    pub fn coins(&self) -> &[CoinSummary] {
        &self.coins
    }

    #[must_use]
    pub fn is_list_loading(&self) -> bool {
        self.list_status == ListStatus::Loading
    }

    /// User-facing message of the last failed list fetch.
    #[must_use]
    pub fn list_error(&self) -> Option<&str> {
        match &self.list_status {
            ListStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    // ── Favorites ───────────────────────────────────────────────────

    #[must_use]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Number shown next to the favorites link.
    #[must_use]
    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Add or remove `id` and persist the new set.
    /// A failed write is logged; the in-memory change stands either way.
    /// Returns whether `id` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites = self.favorites.toggled(id);
        self.favorites_store.persist(&self.favorites);
        self.favorites.contains(id)
    }

    // ── Search ──────────────────────────────────────────────────────

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text (typing). Opens the dropdown, clears the highlight.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.suggestions.text_changed();
    }

    /// Explicit reset of the query.
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.suggestions.text_changed();
    }

    /// The search input gained focus.
    pub fn focus_search(&mut self) {
        self.suggestions.focus();
    }

    /// Pointer down outside the search input and dropdown.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.outside_interaction();
    }

    /// Coins matching the current query, in list order.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&CoinSummary> {
        self.search_service.filter(&self.coins, &self.query)
    }

    #[must_use]
    pub fn highlighted_suggestion(&self) -> Option<usize> {
        self.suggestions.highlighted()
    }

    /// Handle a key in the search box. Returns the fetch to run if a
    /// confirmed suggestion navigated to a coin.
    pub fn search_key(&mut self, key: SearchKey) -> Option<FetchRequest> {
        let selection = {
            let list = self.search_service.filter(&self.coins, &self.query);
            match key {
                SearchKey::ArrowDown => {
                    self.suggestions.move_down(list.len());
                    None
                }
                SearchKey::ArrowUp => {
                    self.suggestions.move_up(list.len());
                    None
                }
                SearchKey::Enter => self.suggestions.confirm(&list),
                SearchKey::Escape => {
                    self.suggestions.cancel();
                    None
                }
            }
        };
        selection.and_then(|s| self.follow_selection(s))
    }

    /// Pointer pick of suggestion `index`.
    pub fn select_suggestion(&mut self, index: usize) -> Option<FetchRequest> {
        let selection = {
            let list = self.search_service.filter(&self.coins, &self.query);
            self.suggestions.select(&list, index)
        };
        selection.and_then(|s| self.follow_selection(s))
    }

    /// View model of the search box and its dropdown.
    #[must_use]
    pub fn search_view(&self) -> SearchView {
        let visible = self.suggestions.is_open() && !self.query.is_empty();
        let highlighted = self.suggestions.highlighted();
        let suggestions: Vec<SuggestionItem> = if visible {
            self.suggestions()
                .into_iter()
                .enumerate()
                .map(|(i, coin)| SuggestionItem {
                    id: coin.id.clone(),
                    name: coin.name.clone(),
                    symbol: coin.symbol.to_uppercase(),
                    highlighted: highlighted == Some(i),
                })
                .collect()
        } else {
            Vec::new()
        };
        SearchView {
            query: self.query.clone(),
            visible,
            no_results: visible && suggestions.is_empty(),
            suggestions,
        }
    }

    fn follow_selection(&mut self, selection: Selection) -> Option<FetchRequest> {
        self.query = selection.name;
        self.navigate(Route::Coin(selection.id))
    }

    // ── Sorting ─────────────────────────────────────────────────────

    #[must_use]
    pub fn sort_directive(&self) -> SortDirective {
        self.sort
    }

    /// Column header click.
    pub fn click_sort_header(&mut self, column: SortColumn) {
        self.sort = self.sort.clicked(column);
    }

    /// All coins, filtered by the query and sorted by the directive.
    #[must_use]
    pub fn visible_coins(&self) -> Vec<&CoinSummary> {
        self.sort_service.apply(&self.coins, &self.query, &self.sort)
    }

    /// Favorite coins present in the list, filtered and sorted the same way.
    #[must_use]
    pub fn visible_favorites(&self) -> Vec<&CoinSummary> {
        self.sort_service
            .apply_favorites(&self.coins, &self.favorites, &self.query, &self.sort)
    }

    // ── Routing ─────────────────────────────────────────────────────

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Activate `route`. Every activation reloads the view: the sort
    /// directive resets, a coin route starts a fresh detail fetch, and the
    /// list routes refetch the list if it previously failed.
    ///
    /// Returns the fetch the caller must run, if any.
    pub fn navigate(&mut self, route: Route) -> Option<FetchRequest> {
        tracing::debug!(from = %self.route, to = %route, "Navigating");
        self.route = route.clone();
        self.sort = SortDirective::none();

        match route {
            Route::Coin(id) => {
                let request = DetailRequest {
                    ticket: self.issue_ticket(),
                    id,
                };
                self.detail = DetailState::Loading(request.clone());
                Some(FetchRequest::Detail(request))
            }
            Route::Home | Route::Favorites => {
                self.detail = DetailState::Idle;
                matches!(self.list_status, ListStatus::Failed(_))
                    .then(|| FetchRequest::List(self.begin_list_fetch()))
            }
            Route::NotFound(_) => {
                self.detail = DetailState::Idle;
                None
            }
        }
    }

    /// Parse `path` and navigate to it.
    pub fn navigate_path(&mut self, path: &str) -> Option<FetchRequest> {
        self.navigate(Route::parse(path))
    }

    /// Apply a detail fetch result. Ignored (returns `false`) unless the
    /// request is still the active one for the coin currently shown.
    pub fn apply_detail(
        &mut self,
        request: DetailRequest,
        result: Result<(CoinDetail, PriceSeries), CoreError>,
    ) -> bool {
        let is_current = matches!(&self.detail, DetailState::Loading(active) if *active == request)
            && self.route.coin_id() == Some(request.id.as_str());
        if !is_current {
            tracing::debug!(id = %request.id, ticket = request.ticket, "Discarding stale coin detail result");
            return false;
        }

        self.detail = match result {
            Ok((detail, series)) => {
                let chart = self.chart_service.build(&detail.name, &series);
                DetailState::Ready {
                    id: request.id,
                    detail,
                    chart,
                }
            }
            Err(e) => {
                tracing::warn!(id = %request.id, error = %e, "Coin detail unavailable");
                DetailState::Failed {
                    id: request.id,
                    message: e.user_message().to_string(),
                }
            }
        };
        true
    }

    /// Run a fetch issued by [`navigate`](Self::navigate) or the search box
    /// and apply its result. Returns whether the result was applied.
    pub async fn fulfil(&mut self, request: FetchRequest) -> bool {
        match request {
            FetchRequest::List(request) => {
                let result = self.market.fetch_list().await;
                self.apply_list(request, result)
            }
            FetchRequest::Detail(request) => {
                let result = self.market.fetch_detail(request.id()).await;
                self.apply_detail(request, result)
            }
        }
    }

    /// Navigate and run whatever fetch the new view needs.
    pub async fn visit(&mut self, route: Route) {
        if let Some(request) = self.navigate(route) {
            self.fulfil(request).await;
        }
    }

    // ── Views ───────────────────────────────────────────────────────

    /// View model for the active route.
    #[must_use]
    pub fn current_view(&self) -> View {
        match &self.route {
            Route::Home => View::AllCoins(self.list_state(|this| CoinListView {
                headers: this.view_service.headers(&this.sort),
                rows: this.view_service.rows(&this.visible_coins(), &this.favorites),
            })),
            Route::Favorites => View::Favorites(self.list_state(|this| FavoritesView {
                headers: this.view_service.headers(&this.sort),
                rows: this.view_service.rows(&this.visible_favorites(), &this.favorites),
                has_favorites: this.coins.iter().any(|c| this.favorites.contains(&c.id)),
            })),
            Route::Coin(id) => View::CoinDetail(match &self.detail {
                DetailState::Ready { id: shown, detail, chart } if shown == id => {
                    LoadState::Ready(self.view_service.detail(
                        detail,
                        chart.clone(),
                        self.favorites.contains(&detail.id),
                    ))
                }
                DetailState::Failed { id: shown, message } if shown == id => LoadState::Failed {
                    message: message.clone(),
                    back: Route::Home,
                },
                _ => LoadState::Loading,
            }),
            Route::NotFound(path) => View::NotFound {
                path: path.clone(),
                back: Route::Home,
            },
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn list_state<T>(&self, ready: impl FnOnce(&Self) -> T) -> LoadState<T> {
        match &self.list_status {
            ListStatus::Loading => LoadState::Loading,
            ListStatus::Failed(message) => LoadState::Failed {
                message: message.clone(),
                back: Route::Home,
            },
            ListStatus::Ready => LoadState::Ready(ready(self)),
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }
}
