use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent
/// error handling. Uses `thiserror` for automatic conversion and display
/// formatting. The HTTP layer maps variants to status codes; the Telegram
/// layer flattens every variant into a friendly failure message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid required input (surfaced as HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Unknown record id (surfaced as HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Catalog file content is not a valid product array
    #[error("catalog data is corrupt: {0}")]
    CorruptData(#[from] serde_json::Error),

    /// Catalog file could not be read or written
    #[error("store I/O error: {0}")]
    Store(#[from] std::io::Error),

    /// External text-generation call failed or timed out (surfaced as HTTP 500)
    #[error("text generation failed: {0}")]
    Generation(String),

    /// HTTP client errors outside the generation path
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Validation error from any message-like input
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Not-found error for a product or customer id
    pub fn not_found(what: &str, id: &str) -> Self {
        AppError::NotFound(format!("{what} '{id}' not found"))
    }
}
