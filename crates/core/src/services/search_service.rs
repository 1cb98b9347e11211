use crate::models::coin::{CoinId, CoinSummary};

/// Free-text filtering of the coin list.
pub struct SearchService;

impl SearchService {
    pub fn new() -> Self {
        Self
    }

    /// Coins whose name or symbol contains `query`, ignoring case.
    ///
    /// An empty query matches everything. Input order is preserved: the
    /// result is always a subsequence of `coins`.
    pub fn filter<'a>(&self, coins: &'a [CoinSummary], query: &str) -> Vec<&'a CoinSummary> {
        if query.is_empty() {
            return coins.iter().collect();
        }
        let needle = query.to_lowercase();
        coins.iter().filter(|c| c.matches_lowercase(&needle)).collect()
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the suggestion dropdown under the search box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Closed,
    /// Dropdown open; `highlighted` is the keyboard cursor, if any.
    Open { highlighted: Option<usize> },
}

/// A suggestion the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: CoinId,
    /// Becomes the new search query.
    pub name: String,
}

/// Keyboard/pointer state machine of the suggestion dropdown.
///
/// The suggestion list itself is derived from the coins and the query on
/// every call; only the open flag and the highlight live here. The highlight
/// is always `None` or a valid index of a list of the length last passed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBox {
    state: SuggestionState,
}

impl SuggestionBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SuggestionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SuggestionState::Open { .. })
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            SuggestionState::Open { highlighted } => highlighted,
            SuggestionState::Closed => None,
        }
    }

    /// Input gained focus.
    pub fn focus(&mut self) {
        self.open_fresh();
    }

    /// Query text changed.
    pub fn text_changed(&mut self) {
        self.open_fresh();
    }

    /// Arrow down over a list of `len` suggestions.
    pub fn move_down(&mut self, len: usize) {
        if let SuggestionState::Open { highlighted } = self.state {
            if len == 0 {
                return;
            }
            let next = match highlighted {
                None => 0,
                Some(i) => (i + 1).min(len - 1),
            };
            self.state = SuggestionState::Open {
                highlighted: Some(next),
            };
        }
    }

    /// Arrow up over a list of `len` suggestions. Never goes back to "no highlight".
    pub fn move_up(&mut self, len: usize) {
        if let SuggestionState::Open { highlighted } = self.state {
            if len == 0 {
                return;
            }
            let next = match highlighted {
                None => 0,
                Some(i) => i.saturating_sub(1).min(len - 1),
            };
            self.state = SuggestionState::Open {
                highlighted: Some(next),
            };
        }
    }

    /// Enter. Closes the dropdown and returns the highlighted suggestion, if any.
    pub fn confirm(&mut self, suggestions: &[&CoinSummary]) -> Option<Selection> {
        let picked = self
            .highlighted()
            .and_then(|i| suggestions.get(i))
            .map(|coin| Selection {
                id: coin.id.clone(),
                name: coin.name.clone(),
            });
        self.close();
        picked
    }

    /// Pointer pick of item `index`, regardless of the highlight.
    pub fn select(&mut self, suggestions: &[&CoinSummary], index: usize) -> Option<Selection> {
        let picked = suggestions.get(index).map(|coin| Selection {
            id: coin.id.clone(),
            name: coin.name.clone(),
        });
        if picked.is_some() {
            self.close();
        }
        picked
    }

    /// Drop the highlight but keep the open/closed state. Called whenever the
    /// underlying suggestion list is replaced.
    pub fn clear_highlight(&mut self) {
        if let SuggestionState::Open { .. } = self.state {
            self.state = SuggestionState::Open { highlighted: None };
        }
    }

    /// Escape.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Pointer down anywhere outside the input and the dropdown.
    pub fn outside_interaction(&mut self) {
        self.close();
    }

    fn open_fresh(&mut self) {
        self.state = SuggestionState::Open { highlighted: None };
    }

    fn close(&mut self) {
        self.state = SuggestionState::Closed;
    }
}

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}
