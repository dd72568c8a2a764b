//! # Product Catalog
//!
//! A signed-in user's product list with create, edit and delete, kept in step with a durable
//! record store.
//!
//! ## Layers
//!
//! - **[`catalog`]**: [`CatalogEngine`](catalog::CatalogEngine), the in-memory list and edit
//!   session. Every write is followed by a full reload from the store.
//! - **[`store`]**: the [`RecordStore`](store::RecordStore) trait with an actor-backed and a
//!   JSON-file implementation.
//! - **[`session`]**: sign-up, sign-in and the current user.
//! - **[`product_actor`], [`user_actor`]**: [`ActorEntity`](resource_actor::ActorEntity)
//!   implementations run by the generic `ResourceActor`.
//! - **[`clients`]**: typed wrappers over `ResourceClient`.
//! - **[`lifecycle`]**: [`CatalogSystem`](lifecycle::CatalogSystem) wires it all together
//!   from a [`CatalogConfig`](config::CatalogConfig).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -p product-catalog -- catalog.toml
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod session;
pub mod store;
pub mod user_actor;
