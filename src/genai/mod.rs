//! External text-generation collaborator.
//!
//! The rest of the application depends only on the narrow [`TextGenerator`]
//! capability; the production implementation is [`GroqClient`], tests swap
//! in a canned mock. Persona preambles and prompt construction live here so
//! the HTTP and chat layers stay thin pass-throughs.

pub mod groq;
pub mod roles;

use async_trait::async_trait;

use crate::core::config;
use crate::core::error::AppResult;

pub use groq::GroqClient;
pub use roles::Personas;

/// Per-request generation parameters.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    /// Optional system-role preamble prepended to the conversation
    pub system: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationOptions {
    /// Options for content generation (product descriptions, plans).
    pub fn content(max_tokens: u32) -> Self {
        Self {
            model: config::groq::CONTENT_MODEL.to_string(),
            system: None,
            temperature: config::groq::TEMPERATURE,
            max_tokens,
        }
    }

    /// Options for conversational replies with a persona preamble.
    pub fn chat(system: impl Into<String>) -> Self {
        Self {
            model: config::groq::CHAT_MODEL.to_string(),
            system: Some(system.into()),
            temperature: config::groq::TEMPERATURE,
            max_tokens: config::groq::CHAT_MAX_TOKENS,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Capability interface for the external text-generation collaborator.
///
/// Implementations must apply their own timeout and surface failures as
/// [`crate::AppError::Generation`] rather than hanging the caller. Calls are
/// never retried or cached here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> AppResult<String>;
}
