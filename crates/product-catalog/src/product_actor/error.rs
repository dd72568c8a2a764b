//! Error types for the Product actor.

use thiserror::Error;

/// Errors raised inside the Product actor's hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The submitted fields break a store-side rule.
    #[error("Invalid product: {0}")]
    Invalid(String),
}
