use super::file::{read_document, replace_document};
use super::{RecordStore, StoreError};
use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Whole-list store: the catalog is one JSON array in one file.
///
/// Every mutation reads the array, changes it and writes the whole array back. The new
/// contents go to a sibling `.tmp` file that is then renamed over the old file, so a reader
/// sees either the old catalog or the new one, never a torn write.
///
/// Ids are UNIX milliseconds at creation, bumped when needed so they stay strictly above
/// every id already issued or already in the file.
#[derive(Debug)]
pub struct BlobRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    last_id: AtomicU64,
}

impl BlobRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            last_id: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, action: &str, err: impl std::fmt::Display) -> StoreError {
        warn!(path = %self.path.display(), action, error = %err, "Blob store failure");
        StoreError::Unavailable(format!("cannot {action} {}: {err}", self.path.display()))
    }

    async fn read_all(&self) -> Result<Vec<Product>, StoreError> {
        match read_document(&self.path).await {
            // First launch: nothing saved yet.
            Ok(None) => Ok(Vec::new()),
            Ok(Some(bytes)) => {
                serde_json::from_slice(&bytes).map_err(|e| self.unavailable("parse", e))
            }
            Err(e) => Err(self.unavailable("read", e)),
        }
    }

    async fn write_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(products).map_err(|e| self.unavailable("encode", e))?;
        replace_document(&self.path, &bytes)
            .await
            .map_err(|e| self.unavailable("write", e))?;

        debug!(path = %self.path.display(), size = products.len(), "Catalog written");
        Ok(())
    }

    /// Caller must hold `write_lock`.
    fn next_id(&self, existing: &[Product]) -> Result<ProductId, StoreError> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let newest = existing.iter().map(|p| p.id.0).max().unwrap_or(0);
        let last = self.last_id.load(Ordering::SeqCst);
        let floor = newest.max(last).checked_add(1).ok_or_else(|| {
            self.unavailable("assign an id in", format!("id space exhausted above {newest}"))
        })?;
        let id = now.max(floor);
        self.last_id.store(id, Ordering::SeqCst);
        Ok(ProductId(id))
    }
}

#[async_trait]
impl RecordStore for BlobRecordStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.read_all().await?;
        debug!(path = %self.path.display(), size = products.len(), "List");
        Ok(products)
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        fields.validate().map_err(StoreError::Validation)?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.read_all().await?;
        let product = Product::new(self.next_id(&products)?, fields);
        products.push(product.clone());
        self.write_all(&products).await?;

        info!(id = %product.id, size = products.len(), "Created");
        Ok(product)
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        fields.validate().map_err(StoreError::Validation)?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.read_all().await?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            warn!(%id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        product.apply(fields);
        self.write_all(&products).await?;

        info!(%id, "Updated");
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.read_all().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            debug!(%id, "Delete of absent product ignored");
            return Ok(());
        }
        self.write_all(&products).await?;

        info!(%id, size = products.len(), "Deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, price: f64) -> ProductFields {
        ProductFields::new(name, price, "desc", "General")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobRecordStore::new(dir.path().join("products.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("products.json");

        let first = BlobRecordStore::new(&path);
        let a = first.create(fields("A", 1.0)).await.unwrap();
        let b = first.create(fields("B", 2.0)).await.unwrap();
        first.update(a.id, fields("A2", 0.1 + 0.2)).await.unwrap();

        let second = BlobRecordStore::new(&path);
        let listed = second.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "A2");
        // Full precision survives the JSON round trip.
        assert_eq!(listed[0].price, 0.1 + 0.2);
        assert_eq!(listed[1], b);

        // A fresh instance still issues ids above those already on disk.
        let c = second.create(fields("C", 3.0)).await.unwrap();
        assert!(c.id > b.id);
        assert!(!crate::store::file::staging_path(&path).exists());
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_within_one_millisecond() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobRecordStore::new(dir.path().join("products.json"));

        let mut last = ProductId(0);
        for i in 0..5 {
            let product = store.create(fields(&format!("P{i}"), 1.0)).await.unwrap();
            assert!(product.id > last);
            last = product.id;
        }
    }

    #[tokio::test]
    async fn test_update_missing_and_delete_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobRecordStore::new(dir.path().join("products.json"));

        let update = store.update(ProductId(1), fields("A", 1.0)).await;
        assert_eq!(update, Err(StoreError::NotFound("product_1".to_string())));
        assert_eq!(store.delete(ProductId(1)).await, Ok(()));
        // A no-op delete does not create the file.
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let imported = vec![Product::new(ProductId(u64::MAX), fields("Max", 1.0))];
        std::fs::write(&path, serde_json::to_vec(&imported).unwrap()).unwrap();

        let store = BlobRecordStore::new(&path);
        assert_eq!(store.list().await.unwrap(), imported);
        assert!(matches!(
            store.create(fields("Next", 1.0)).await,
            Err(StoreError::Unavailable(_))
        ));
        // Nothing was written.
        assert_eq!(store.list().await.unwrap(), imported);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = BlobRecordStore::new(&path);
        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.create(fields("A", 1.0)).await,
            Err(StoreError::Unavailable(_))
        ));
        // The unreadable file is left as it was.
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }
}
