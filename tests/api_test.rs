//! Integration tests for the REST API.

mod common;

use axum::http::StatusCode;
use common::{send, test_app, MockGenerator};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn product_crud_lifecycle() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    // Create with minimal fields: defaults applied
    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Lamp", "price": 19.99})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Lamp");
    assert_eq!(created["price"], 19.99);
    assert_eq!(created["stock"], 0);
    assert_eq!(created["description"], "");
    assert_eq!(created["imageUrl"], "");
    let id = created["id"].as_str().unwrap().to_string();

    // Listed after creation
    let (status, listed) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    // Stock patch
    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/api/products/{id}/stock"),
        Some(json!({"stock": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["stock"], 5);

    // Delete
    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone from the listing
    let (_, listed) = send(&app, "GET", "/api/products", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_product_rejects_missing_name() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, body) = send(&app, "POST", "/api/products", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));

    // No record was created
    let (_, listed) = send(&app, "GET", "/api/products", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_applies_partial_patch_only() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (_, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Lamp", "price": 19.99, "description": "Original"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({"name": "Desk Lamp"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Desk Lamp");
    assert_eq!(updated["price"], 19.99);
    assert_eq!(updated["description"], "Original");
}

#[tokio::test]
async fn update_unknown_product_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, body) = send(
        &app,
        "PUT",
        "/api/products/prod0-0",
        Some(json!({"name": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn stock_patch_validation_and_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (_, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Lamp", "price": 10})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/products/{id}/stock"),
        Some(json!({"stock": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/products/prod0-0/stock",
        Some(json!({"stock": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Failed attempts left the stock untouched
    let (_, listed) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(listed[0]["stock"], 0);
}

#[tokio::test]
async fn delete_unknown_product_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, _) = send(&app, "DELETE", "/api/products/prod0-0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn regenerate_requires_force_flag() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (_, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Survivor", "price": 1})),
    )
    .await;
    let old_id = created["id"].as_str().unwrap().to_string();

    // Without force: refused, catalog untouched
    let (status, body) = send(&app, "POST", "/api/products/regenerate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("force"));
    let (_, listed) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // With force: full replacement
    let (status, products) = send(
        &app,
        "POST",
        "/api/products/regenerate",
        Some(json!({"force": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 10);
    for p in products {
        let price = p["price"].as_f64().unwrap();
        let stock = p["stock"].as_u64().unwrap();
        assert!((20.0..120.0).contains(&price));
        assert!((1..=50).contains(&stock));
        assert_ne!(p["id"].as_str().unwrap(), old_id);
    }
}

#[tokio::test]
async fn customer_registry_endpoints() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({"name": "Alice Smith"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let (status, created) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({"name": "Alice Smith", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["phone"], "");

    let (status, listed) = send(&app, "GET", "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["email"], "alice@example.com");
}

#[tokio::test]
async fn description_generation_forwards_to_the_generator() {
    let dir = TempDir::new().unwrap();
    let mock = MockGenerator::replying("A lamp you will love.");
    let app = test_app(&dir, mock.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-product-description",
        Some(json!({"productName": "Lamp", "productDetails": "oak base, warm light"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "A lamp you will love.");

    let prompts = mock.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Lamp\""));
    assert!(prompts[0].contains("oak base, warm light"));
}

#[tokio::test]
async fn description_generation_requires_product_name() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-product-description",
        Some(json!({"productDetails": "no name given"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("productName"));
}

#[tokio::test]
async fn generation_failure_surfaces_as_500() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::failing());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-business-plan",
        Some(json!({"projectDetails": "an online plant shop"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("generation failed"));
}

#[tokio::test]
async fn business_plan_returns_generated_content() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("Plan: sell plants."));

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-business-plan",
        Some(json!({"projectDetails": "an online plant shop"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Plan: sell plants.");

    let (status, body) = send(&app, "POST", "/api/generate-business-plan", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("projectDetails"));
}

#[tokio::test]
async fn health_endpoint_responds() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, MockGenerator::replying("unused"));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
