use crate::errors::CoreError;
use crate::models::favorites::Favorites;

use super::kv::KeyValueStore;

/// Loads and saves the favorites set through a [`KeyValueStore`].
///
/// Flow: Favorites → JSON array of ids → single string entry under `key`.
///
/// `load` and `persist` never fail outward: problems are logged and the
/// in-memory favorites stay authoritative.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store (e.g. to inspect what was written).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read and parse the stored favorites, surfacing any error.
    /// A missing entry is an empty set, not an error.
    pub fn try_load(&self) -> Result<Favorites, CoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Favorites::new());
        };
        let ids: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Deserialization(format!("Stored favorites under '{}' are not a JSON array of ids: {e}", self.key))
        })?;
        Ok(ids.into_iter().collect())
    }

    /// Like [`try_load`](Self::try_load), but any failure yields an empty set.
    pub fn load(&self) -> Favorites {
        match self.try_load() {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), key = %self.key, "Loaded favorites");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Failed to load favorites, starting empty");
                Favorites::new()
            }
        }
    }

    /// Serialize and write, surfacing any error.
    pub fn try_persist(&mut self, favorites: &Favorites) -> Result<(), CoreError> {
        let json = serde_json::to_string(favorites)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize favorites: {e}")))?;
        self.store.set(&self.key, &json)
    }

    /// Write the set; failures are logged and otherwise ignored.
    /// Returns whether the write went through.
    pub fn persist(&mut self, favorites: &Favorites) -> bool {
        match self.try_persist(favorites) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, key = %self.key, "Failed to save favorites");
                false
            }
        }
    }
}
