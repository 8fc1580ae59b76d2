//! Error types for record sources.

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The records could not seed a sorter.
    #[error("Sorter error: {0}")]
    Sorter(#[from] sorter_core::Error),
}
