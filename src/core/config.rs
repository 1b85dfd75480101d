use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the shop backend
///
/// Everything here is read once at startup from environment variables,
/// with defaults that match the demo deployment.

/// Path to the product catalog JSON file
/// Read from PRODUCTS_FILE environment variable
pub static PRODUCTS_FILE: Lazy<String> =
    Lazy::new(|| env::var("PRODUCTS_FILE").unwrap_or_else(|_| "db_article.json".to_string()));

/// Port for the REST API server
/// Read from WEB_PORT environment variable, defaults to 3000
pub static WEB_PORT: Lazy<u16> = Lazy::new(|| {
    env::var("WEB_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
});

/// Allowed origin for cross-origin requests to the API
/// Read from ALLOWED_ORIGIN environment variable
pub static ALLOWED_ORIGIN: Lazy<String> =
    Lazy::new(|| env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string()));

/// Log file path
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE").unwrap_or_else(|_| "boutiq.log".to_string()));

/// Telegram bot token (TELOXIDE_TOKEN)
/// Empty when unset; the bot is simply not started in that case.
pub static BOT_TOKEN: Lazy<String> =
    Lazy::new(|| env::var("TELOXIDE_TOKEN").unwrap_or_default());

/// Chat id of the Telegram group that receives `/send_topic` relays
/// Read from TARGET_GROUP_ID environment variable; unset disables the relay.
pub static TARGET_GROUP_ID: Lazy<Option<i64>> = Lazy::new(|| {
    env::var("TARGET_GROUP_ID").ok().and_then(|id| id.parse().ok())
});

/// Optional directory with persona role files (roles-system.json,
/// roles-assistant.json). Built-in defaults are used when unset.
pub static ROLES_DIR: Lazy<Option<String>> = Lazy::new(|| env::var("ROLES_DIR").ok());

/// Groq API configuration
pub mod groq {
    use super::{env, Lazy};

    /// API key for the Groq API
    pub static API_KEY: Lazy<String> =
        Lazy::new(|| env::var("GROQ_API_KEY").unwrap_or_default());

    /// Base URL for the Groq API (OpenAI-compatible)
    /// Override with GROQ_API_URL to point at a mock server in tests.
    pub static API_URL: Lazy<String> = Lazy::new(|| {
        env::var("GROQ_API_URL").unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string())
    });

    /// Model used for conversational replies (Telegram free text)
    pub const CHAT_MODEL: &str = "gemma2-9b-it";

    /// Model used for content generation (descriptions, business plans)
    pub const CONTENT_MODEL: &str = "llama-3.1-8b-instant";

    /// Sampling temperature for all completions
    pub const TEMPERATURE: f32 = 0.7;

    /// Token budgets per use case
    pub const CHAT_MAX_TOKENS: u32 = 4048;
    pub const DESCRIPTION_MAX_TOKENS: u32 = 500;
    pub const PLAN_MAX_TOKENS: u32 = 1000;
}

/// Catalog configuration
pub mod catalog {
    /// Number of products synthesized by a bulk regeneration
    pub const REGENERATE_COUNT: usize = 10;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for outbound HTTP requests (Groq, Telegram)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
