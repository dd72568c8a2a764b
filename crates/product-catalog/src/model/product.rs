//! Product records and the field set used to create or replace them.
//!
//! # Actor Framework
//! [`Product`] implements [`ActorEntity`](resource_actor::ActorEntity) (see
//! [`product_actor`](crate::product_actor)), so it can be owned by a
//! [`ResourceActor`](resource_actor::ResourceActor) as well as persisted as JSON by the blob store.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// The actor store hands out small sequence numbers; the blob store uses millisecond
/// timestamps. Both fit in a `u64` and both only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(u64::from(id))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Stored at full precision; rounded only for display.
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl Product {
    /// Creates a product from an assigned id and its fields.
    pub fn new(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            description: fields.description,
            category: fields.category,
        }
    }

    /// Replaces every mutable field, keeping the id.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.description = fields.description;
        self.category = fields.category;
    }

    /// The current fields, detached from the id.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }

    /// Price with exactly two fractional digits, e.g. `$1.50`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.name,
            self.display_price(),
            self.category,
            self.description
        )
    }
}

/// The four editable fields of a product, already parsed.
///
/// Used as both the create payload and the full-replacement update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl ProductFields {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
            category: category.into(),
        }
    }

    /// Store-side rules: name and category present, price finite and not negative.
    /// An empty description is allowed here.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        Ok(())
    }
}
