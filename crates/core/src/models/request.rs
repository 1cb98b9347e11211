use super::coin::CoinId;

/// Ticket for an in-flight coin list fetch.
///
/// Only the dashboard hands these out; a result is applied only while its
/// ticket is still the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub(crate) ticket: u64,
}

/// Ticket for an in-flight detail + chart fetch of one coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub(crate) ticket: u64,
    pub(crate) id: CoinId,
}

impl DetailRequest {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Fetch the front-end must run after activating a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    List(ListRequest),
    Detail(DetailRequest),
}
