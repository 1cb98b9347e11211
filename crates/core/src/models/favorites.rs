use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::coin::CoinId;

/// The set of coin ids the user marked as favorite.
///
/// Backed by a `BTreeSet` so membership is deterministic and serialization
/// order is stable (sorted). Serializes as a plain JSON array of ids.
///
/// Ids are not checked against the current coin list: a favorite that is not
/// in the list is simply not rendered, but stays a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<CoinId>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Return a new set with `id` removed if present, added otherwise.
    /// `self` is left untouched.
    #[must_use]
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        Self(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &CoinId> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
