//! REST API over the catalog service and customer registry.
//!
//! Responsibility is limited to request decoding, validation delegation,
//! status-code mapping, and JSON encoding. The two AI endpoints forward a
//! constructed prompt to the text-generation collaborator and return its
//! text verbatim — no retries, no caching.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::catalog::{CatalogService, NewProduct, ProductPatch};
use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::customers::{CustomerRegistry, NewCustomer};
use crate::genai::{roles, GenerationOptions, Personas, TextGenerator};

/// Shared state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub customers: Arc<CustomerRegistry>,
    pub generator: Arc<dyn TextGenerator>,
    pub personas: Personas,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&config::ALLOWED_ORIGIN);

    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route("/api/products/{id}/stock", axum::routing::patch(update_stock))
        .route("/api/products/regenerate", post(regenerate_catalog))
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/generate-product-description", post(generate_description))
        .route("/api/generate-business-plan", post(generate_business_plan))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// CORS layer restricted to the configured storefront origin.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            log::warn!("Invalid ALLOWED_ORIGIN '{}' ({}), CORS disabled", origin, e);
            layer
        }
    }
}

/// Start the API server.
pub async fn start_web_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    log::info!("Shop API listening on http://{}", addr);
    log::info!("  /api/products               - catalog CRUD");
    log::info!("  /api/customers              - customer registry");
    log::info!("  /api/generate-*             - AI content generation");
    log::info!("  /health                     - health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /health
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// GET /api/products
async fn list_products(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.catalog.list().await))
}

/// POST /api/products
async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> AppResult<Response> {
    let product = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// PUT /api/products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> AppResult<Response> {
    let product = state.catalog.update(&id, patch).await?;
    Ok(Json(product).into_response())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct StockUpdate {
    stock: Option<Value>,
}

/// PATCH /api/products/{id}/stock
async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockUpdate>,
) -> AppResult<Response> {
    let product = state.catalog.update_stock(&id, body.stock.as_ref()).await?;
    Ok(Json(product).into_response())
}

/// DELETE /api/products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    state.catalog.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RegenerateRequest {
    count: Option<usize>,
    force: bool,
}

/// POST /api/products/regenerate
///
/// Destructive: replaces the whole catalog. Requires an explicit
/// `force: true` since there is no confirmation step on the HTTP path.
async fn regenerate_catalog(
    State(state): State<AppState>,
    Json(body): Json<RegenerateRequest>,
) -> AppResult<Response> {
    if !body.force {
        return Err(AppError::validation(
            "Regeneration replaces the entire catalog; pass force=true to confirm.",
        ));
    }
    let count = body.count.unwrap_or(config::catalog::REGENERATE_COUNT);
    let products = state.catalog.regenerate(count).await?;
    Ok(Json(products).into_response())
}

/// GET /api/customers
async fn list_customers(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.customers.list().await))
}

/// POST /api/customers
async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<NewCustomer>,
) -> AppResult<Response> {
    let customer = state.customers.create(input).await?;
    Ok((StatusCode::CREATED, Json(customer)).into_response())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct DescriptionRequest {
    product_name: Option<String>,
    product_details: Option<String>,
}

/// POST /api/generate-product-description
async fn generate_description(
    State(state): State<AppState>,
    Json(body): Json<DescriptionRequest>,
) -> AppResult<Response> {
    let name = body
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("productName is required."))?;
    let details = body.product_details.as_deref().unwrap_or("");

    let prompt = roles::description_prompt(name, details);
    let options = GenerationOptions::content(config::groq::DESCRIPTION_MAX_TOKENS)
        .with_system(state.personas.system.clone());
    let description = state.generator.generate(&prompt, &options).await?;

    Ok(Json(json!({ "description": description })).into_response())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct BusinessPlanRequest {
    project_details: Option<String>,
}

/// POST /api/generate-business-plan
async fn generate_business_plan(
    State(state): State<AppState>,
    Json(body): Json<BusinessPlanRequest>,
) -> AppResult<Response> {
    let details = body
        .project_details
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::validation("projectDetails is required."))?;

    let prompt = roles::business_plan_prompt(details);
    let options = GenerationOptions::content(config::groq::PLAN_MAX_TOKENS)
        .with_system(state.personas.system.clone());
    let content = state.generator.generate(&prompt, &options).await?;

    Ok(Json(json!({ "content": content })).into_response())
}
