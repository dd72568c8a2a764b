//! # System Lifecycle
//!
//! Starts the actors, picks the record store, and shuts everything down again.
//!
//! ## Startup
//!
//! 1. Spawn the User actor for the [`SessionGate`](crate::session::SessionGate).
//! 2. Build the store named by `[store] backend`: a Product actor for `"actor"`, a
//!    [`BlobRecordStore`](crate::store::BlobRecordStore) on `blob_path` for `"blob"`.
//! 3. Wrap the store in a [`CatalogEngine`](crate::catalog::CatalogEngine), applying
//!    `timeout_ms` if set.
//!
//! ## Shutdown
//!
//! Actors stop when every client for them has been dropped. [`CatalogSystem::shutdown`]
//! drops the engine (and with it the Product client) and the gate (the User client), then
//! awaits each actor task. No actor holds a client to another, so the order does not matter.
//!
//! ## Tracing
//!
//! Subscriber setup lives in the framework: [`resource_actor::tracing`]. The binary passes
//! `[logging] level` as the fallback filter when `RUST_LOG` is unset.

pub mod catalog_system;

pub use catalog_system::*;
