use serde::{Deserialize, Serialize};

use super::coin::CoinId;

/// Navigation targets of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// `/`: all coins
    #[default]
    Home,
    /// `/coin/{id}`: one coin's detail
    Coin(CoinId),
    /// `/favorites`: favorites only
    Favorites,
    /// Anything else; keeps the requested path for the not-found view
    NotFound(String),
}

impl Route {
    /// Parse a path such as `/coin/bitcoin`. Query strings and fragments are
    /// ignored, as is a single trailing slash.
    pub fn parse(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = match bare.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => bare,
        };

        match trimmed {
            "" | "/" => Route::Home,
            "/favorites" => Route::Favorites,
            _ => match trimmed.strip_prefix("/coin/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Coin(id.to_string()),
                _ => Route::NotFound(path.to_string()),
            },
        }
    }

    /// Path for links and history entries.
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Coin(id) => format!("/coin/{id}"),
            Route::Favorites => "/favorites".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn coin_id(&self) -> Option<&str> {
        match self {
            Route::Coin(id) => Some(id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_path())
    }
}
