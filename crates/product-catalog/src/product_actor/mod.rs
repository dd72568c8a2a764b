//! # Product Actor
//!
//! Keeps the catalog's records inside a [`ResourceActor`] task. This is the per-record
//! backend: each catalog mutation is one request, and the actor's id-ordered map means
//! `list` returns products in creation order.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] raised by the hooks
//! - [`new()`] - Factory returning the actor and a [`ProductClient`]
//!
//! ## Usage
//!
//! ```rust
//! use product_catalog::model::ProductFields;
//! use product_catalog::product_actor;
//! use resource_actor::ActorClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductFields::new("Pen", 1.5, "Blue ink", "Stationery"))
//!         .await?;
//!     let listed = client.list().await?;
//!     assert_eq!(listed.len(), 1);
//!     assert_eq!(listed[0].id, id);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::ProductAction;
pub use error::ProductError;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
