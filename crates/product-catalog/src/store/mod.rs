//! # Record Stores
//!
//! The durable side of the catalog. [`RecordStore`] is the only interface the
//! [`CatalogEngine`](crate::catalog::CatalogEngine) talks to, so the engine never knows which
//! persistence strategy is underneath.
//!
//! Two implementations:
//!
//! - [`ActorRecordStore`] - per-record operations against the Product actor.
//! - [`BlobRecordStore`] - the whole catalog as one JSON document, rewritten on every change.
//!
//! ## Contract
//!
//! - `update` on a missing id fails with [`StoreError::NotFound`].
//! - `delete` on a missing id succeeds and changes nothing.
//! - A write that has returned is visible to the next `list`.

mod actor_store;
mod blob_store;
pub(crate) mod file;

pub use actor_store::ActorRecordStore;
pub use blob_store::BlobRecordStore;

use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a record store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The fields were rejected before anything was written.
    #[error("Invalid product: {0}")]
    Validation(String),

    /// No record with this id exists.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The backing medium could not be read or written.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

impl From<String> for StoreError {
    fn from(msg: String) -> Self {
        StoreError::Unavailable(msg)
    }
}

/// Durable keyed storage for products.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record, in store order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Assigns a fresh id, persists the record and returns it.
    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Replaces the fields of an existing record.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError>;

    /// Removes a record. Removing an absent id is not an error.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
