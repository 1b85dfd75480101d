//! Boutiq — e-commerce demo backend
//!
//! This library provides all the functionality for the Boutiq demo shop:
//! a product catalog persisted to a single JSON file, a REST API over it,
//! an in-memory customer registry, and a Telegram storefront bot whose
//! free-form replies are generated by the Groq API.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and common helpers
//! - `catalog`: Product model, JSON-file store, and catalog service
//! - `customers`: In-memory customer registry
//! - `genai`: Text-generation trait, Groq client, and persona prompts
//! - `web`: REST API (axum)
//! - `telegram`: Telegram bot commands and handlers

pub mod catalog;
pub mod core;
pub mod customers;
pub mod genai;
pub mod telegram;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::catalog::{CatalogService, CatalogStore, Product};
pub use crate::core::{config, init_logger, AppError, AppResult};
pub use crate::customers::{Customer, CustomerRegistry};
pub use crate::genai::{GenerationOptions, GroqClient, Personas, TextGenerator};
pub use crate::web::AppState;
