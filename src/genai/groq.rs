//! Groq API client (OpenAI-compatible chat completions).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::genai::{GenerationOptions, TextGenerator};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the Groq chat-completions API.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    /// Build a client with an explicit key and base URL (tests point the
    /// base URL at a mock server).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config::network::timeout())
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Build a client from the GROQ_API_KEY / GROQ_API_URL environment.
    pub fn from_env() -> AppResult<Self> {
        let api_key = config::groq::API_KEY.clone();
        if api_key.is_empty() {
            log::warn!("GROQ_API_KEY is not set; text generation requests will fail");
        }
        Self::new(api_key, config::groq::API_URL.clone())
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> AppResult<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("request to Groq failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Groq API returned {} for model {}: {}", status, options.model, body);
            return Err(AppError::Generation(format!("Groq API returned {status}")));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("unexpected Groq response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Generation("Groq response contained no choices".to_string()))
    }
}
