//! Error types for the catalog engine.

use crate::store::StoreError;
use thiserror::Error;

/// Failures reported by [`CatalogEngine`](super::CatalogEngine) operations.
///
/// Every failure leaves the engine in the state it had before the call, except where the
/// operation documents otherwise.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// Draft fields were rejected; nothing was sent to the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The record store could not be reached, failed, or timed out.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => CatalogError::Validation(msg),
            StoreError::NotFound(msg) => CatalogError::NotFound(msg),
            StoreError::Unavailable(msg) => CatalogError::StoreUnavailable(msg),
        }
    }
}
