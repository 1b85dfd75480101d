//! Durable mapping between the catalog file and the in-memory product list.
//!
//! The backing file holds a single JSON array of products. `save` is a
//! full-file replacement, not incremental — a crash mid-write can corrupt
//! the file. That is an accepted limitation of this deployment size.

use std::path::{Path, PathBuf};

use crate::catalog::Product;
use crate::core::error::{AppError, AppResult};

/// Reads and writes the product catalog file.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store over the given file path. Nothing is touched until
    /// the first `load` or `save`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, degrading to an empty collection on corrupt data.
    ///
    /// A missing file is created with an empty array. Unparseable content is
    /// logged and treated as empty, favoring availability over strict error
    /// surfacing. Use [`CatalogStore::load_strict`] to get the error instead.
    pub async fn load(&self) -> Vec<Product> {
        match self.load_strict().await {
            Ok(products) => products,
            Err(e) => {
                log::error!("Failed to load catalog from {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Load the catalog, propagating corruption and I/O failures.
    pub async fn load_strict(&self) -> AppResult<Vec<Product>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Catalog file {} does not exist, creating it empty",
                    self.path.display()
                );
                self.save(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::Store(e)),
        };

        let products: Vec<Product> = serde_json::from_str(&data)?;
        Ok(products)
    }

    /// Serialize the full ordered collection and overwrite the file.
    pub async fn save(&self, products: &[Product]) -> AppResult<()> {
        let data = serde_json::to_string_pretty(products)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: 9.99,
            image_url: String::new(),
            stock: 0,
        }
    }

    #[tokio::test]
    async fn load_creates_missing_file_and_returns_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db_article.json");
        let store = CatalogStore::new(&path);

        let products = store.load().await;
        assert!(products.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_values() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(dir.path().join("db.json"));

        let products = vec![product("p1", "First"), product("p2", "Second"), product("p3", "Third")];
        store.save(&products).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn save_of_unmodified_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(dir.path().join("db.json"));
        store.save(&[product("p1", "Only")]).await.unwrap();

        let first = store.load().await;
        store.save(&first).await.unwrap();
        let second = store.load().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = CatalogStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = CatalogStore::new(&path);
        let err = store.load_strict().await.unwrap_err();
        assert!(matches!(err, AppError::CorruptData(_)));
    }
}
