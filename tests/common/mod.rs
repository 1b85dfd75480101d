//! Shared test helpers: mock text generator, app state, request driver.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use boutiq::catalog::{CatalogService, CatalogStore};
use boutiq::core::{AppError, AppResult};
use boutiq::customers::CustomerRegistry;
use boutiq::genai::{GenerationOptions, Personas, TextGenerator};
use boutiq::web::{router, AppState};

/// Canned text generator. `reply: None` simulates a generation failure.
/// Prompts are recorded for assertions.
pub struct MockGenerator {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(AppError::Generation("mock generator failure".to_string())),
        }
    }
}

/// Build a router over a temp-file catalog and the given generator.
pub fn test_app(dir: &TempDir, generator: Arc<dyn TextGenerator>) -> Router {
    let state = AppState {
        catalog: Arc::new(CatalogService::new(CatalogStore::new(dir.path().join("db.json")))),
        customers: Arc::new(CustomerRegistry::new()),
        generator,
        personas: Personas::default(),
    };
    router(state)
}

/// Fire one request at the router and decode the response.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
