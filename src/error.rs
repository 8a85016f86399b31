//! Crate-level error types.
//!
//! [`TickerError`] unifies every failure source (configuration, HTTP,
//! payload shape, local cache, terminal) behind a single enum. Only
//! configuration errors are fatal; everything else is recovered by a
//! fallback inside the pipeline and never reaches the presenter.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickerError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickerError {
    /// A configuration value is missing, unparsable, or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request failed or the upstream answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream body parsed but lacks the fields we need.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The cached record exists but could not be read or parsed.
    #[error("cache read error: {0}")]
    CacheRead(String),

    /// A terminal or filesystem operation failed.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TickerError {
    fn from(err: std::io::Error) -> Self {
        TickerError::Io(err.to_string())
    }
}
