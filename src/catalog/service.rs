//! Product lifecycle operations over the catalog store.
//!
//! Each mutation is a load → mutate → save cycle. The cycles are serialized
//! by a single async mutex so that two concurrent writers can no longer
//! silently discard each other's change (the legacy implementation had no
//! locking and accepted the lost-update anomaly; we fix it and document the
//! behavior change in DESIGN.md).

use rand::Rng;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::catalog::{next_product_id, parse_price, parse_stock, NewProduct, Product, ProductPatch};
use crate::catalog::store::CatalogStore;
use crate::core::error::{AppError, AppResult};

/// Name pool for synthesized products.
const NAMES: [&str; 8] = [
    "Smartphone X",
    "Laptop Pro",
    "Mystery Novel",
    "Coffee Maker",
    "T-Shirt",
    "Running Shoes",
    "Smartwatch",
    "Gaming Headset",
];

/// Category pool for synthesized products.
const CATEGORIES: [&str; 5] = ["Electronics", "Books", "Home Goods", "Clothing", "Sports"];

/// All product CRUD operations, shared by the REST API and the Telegram bot.
pub struct CatalogService {
    store: CatalogStore,
    /// Held across every load → mutate → save cycle.
    write_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Full collection in insertion order. Never fails: store failures
    /// degrade to an empty list inside the store.
    pub async fn list(&self) -> Vec<Product> {
        self.store.load().await
    }

    /// Create a product and append it to the catalog.
    ///
    /// Requires a non-empty `name` and a `price` parseable as a non-negative
    /// number. `description` and `imageUrl` default to empty, `stock` to 0;
    /// an invalid or negative supplied stock also falls back to 0.
    pub async fn create(&self, input: NewProduct) -> AppResult<Product> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Product name and price are required."))?
            .to_string();

        let price = input
            .price
            .as_ref()
            .and_then(parse_price)
            .ok_or_else(|| AppError::validation("Product price must be a non-negative number."))?;

        let product = Product {
            id: next_product_id(),
            name,
            description: input.description.unwrap_or_default(),
            price,
            image_url: input.image_url.unwrap_or_default(),
            stock: input.stock.as_ref().and_then(parse_stock).unwrap_or(0),
        };

        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await;
        products.push(product.clone());
        self.store.save(&products).await?;

        log::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Apply a partial update to an existing product.
    ///
    /// Only fields present in the patch overwrite; omitted fields keep their
    /// previous value (unlike `create`, nothing is reset to a default).
    /// Invalid values in the patch are dropped, retaining the previous
    /// value: an empty or blank `name`, a negative or unparseable `price`
    /// or `stock`. A product never ends up with an empty name.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> AppResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("product", id))?;

        if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            product.name = name.to_string();
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = image_url;
        }
        if let Some(price) = patch.price.as_ref().and_then(parse_price) {
            product.price = price;
        }
        if let Some(stock) = patch.stock.as_ref().and_then(parse_stock) {
            product.stock = stock;
        }

        let updated = product.clone();
        self.store.save(&products).await?;
        Ok(updated)
    }

    /// Set a product's stock to an exact value.
    ///
    /// Unlike `update`, an invalid stock here is a validation error rather
    /// than being dropped: this endpoint exists only to set stock.
    pub async fn update_stock(&self, id: &str, stock: Option<&Value>) -> AppResult<Product> {
        let stock = stock
            .and_then(parse_stock)
            .ok_or_else(|| AppError::validation("Stock must be a non-negative number."))?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("product", id))?;

        product.stock = stock;
        let updated = product.clone();
        self.store.save(&products).await?;
        Ok(updated)
    }

    /// Remove a product, preserving the relative order of the rest.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::not_found("product", id));
        }
        self.store.save(&products).await?;
        log::info!("Deleted product {}", id);
        Ok(())
    }

    /// Replace the entire catalog with `count` freshly synthesized products.
    ///
    /// Irreversible: pre-existing products are lost. The HTTP path gates
    /// this behind an explicit `force` flag; the Telegram admin command
    /// triggers it directly.
    pub async fn regenerate(&self, count: usize) -> AppResult<Vec<Product>> {
        let products = synthesize_products(count);

        let _guard = self.write_lock.lock().await;
        self.store.save(&products).await?;

        log::info!("Regenerated catalog with {} random products", products.len());
        Ok(products)
    }
}

/// Synthesize `count` random products.
///
/// Price ∈ [20, 120) rounded down to cents, stock ∈ [1, 50], names and
/// categories drawn from fixed pools.
fn synthesize_products(count: usize) -> Vec<Product> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let base = NAMES[rng.random_range(0..NAMES.len())];
            let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
            let name = format!("{} {}", base, i + 1);
            // Floor keeps the cent-rounded price strictly below 120.
            let price = (rng.random_range(20.0_f64..120.0) * 100.0).floor() / 100.0;
            Product {
                id: next_product_id(),
                description: format!("Description for {name} ({category})."),
                name,
                price,
                image_url: format!("https://picsum.photos/200/300?random={i}"),
                stock: rng.random_range(1..=50),
            }
        })
        .collect()
}
