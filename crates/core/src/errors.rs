use thiserror::Error;

/// Shown to the user when the coin list cannot be loaded.
pub const LIST_FETCH_MESSAGE: &str = "Failed to fetch cryptocurrency data. Please try again later.";

/// Shown to the user when a coin's detail or chart cannot be loaded.
pub const DETAIL_FETCH_MESSAGE: &str =
    "Failed to fetch coin details or chart data. Please check the coin ID or try again later.";

/// Unified error type for the entire cryptostats-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Rate limit exceeded ({provider})")]
    RateLimited { provider: String },

    #[error("Network error: {0}")]
    Network(String),

    // ── Fetch outcomes surfaced to views ────────────────────────────
    #[error("Coin list fetch failed: {0}")]
    ListFetch(Box<CoreError>),

    #[error("Coin detail fetch failed: {0}")]
    DetailFetch(Box<CoreError>),

    // ── Data ────────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Static, user-displayable text for this error.
    ///
    /// Only the two fetch outcomes have dedicated wording; anything else
    /// falls back to the list message.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            CoreError::DetailFetch(_) => DETAIL_FETCH_MESSAGE,
            _ => LIST_FETCH_MESSAGE,
        }
    }

    /// Underlying cause of a wrapped fetch error, or `self` for anything else.
    #[must_use]
    pub fn root_cause(&self) -> &CoreError {
        match self {
            CoreError::ListFetch(inner) | CoreError::DetailFetch(inner) => inner.root_cause(),
            other => other,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full request URL; strip its query string.
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Replace everything after the first `?` with a placeholder.
fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
