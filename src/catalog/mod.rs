//! Product catalog: data model, JSON-file store, and service layer.
//!
//! The catalog file is the single source of truth for products. Every
//! mutation re-reads current state, applies the change, and writes the full
//! collection back; `CatalogService` serializes those cycles.

pub mod service;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::utils::unique_id;

pub use service::CatalogService;
pub use store::CatalogStore;

/// A product record as persisted in the catalog file.
///
/// Field names are camelCase on the wire (`imageUrl`) to match the layout
/// the storefront reads. Collection order is insertion order; nothing sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique id, assigned at creation, immutable afterwards
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative price
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    /// Non-negative stock count
    #[serde(default)]
    pub stock: u32,
}

/// Input for creating a product.
///
/// `price` and `stock` come in as raw JSON values because clients send both
/// numbers and numeric strings; parsing lives in the service.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub image_url: Option<String>,
    pub stock: Option<Value>,
}

/// Partial update for a product. Absent fields are left unchanged.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub image_url: Option<String>,
    pub stock: Option<Value>,
}

/// Generate a fresh product id.
pub fn next_product_id() -> String {
    unique_id("prod")
}

/// Parse a JSON value as a number, accepting numeric strings.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a price: finite and non-negative, or nothing.
pub(crate) fn parse_price(value: &Value) -> Option<f64> {
    parse_number(value).filter(|p| p.is_finite() && *p >= 0.0)
}

/// Parse a stock count: non-negative integer (fractional input truncates).
pub(crate) fn parse_stock(value: &Value) -> Option<u32> {
    parse_number(value)
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(|s| s as u32)
}
