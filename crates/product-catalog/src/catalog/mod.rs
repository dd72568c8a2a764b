//! # Catalog Engine
//!
//! Keeps an editable in-memory product list in step with a [`RecordStore`](crate::store::RecordStore).
//!
//! ## Synchronization
//!
//! The engine never patches its list. Every successful write is followed by
//! [`load_catalog`](CatalogEngine::load_catalog), which replaces the list with whatever the
//! store returns. What the UI renders is therefore always what is persisted.
//!
//! ## Edit session
//!
//! ```text
//! Idle ──begin_edit(id)──▶ Editing(id)
//!  ▲                          │
//!  ├──── submit ok ───────────┤
//!  ├──── cancel_edit ─────────┤
//!  ├──── remove(id) ──────────┤
//!  └──── refresh without id ──┘
//! ```
//!
//! A failed submit (invalid drafts, store unavailable) stays in `Editing(id)` with the drafts
//! intact so the user can retry.
//!
//! ## Example
//!
//! ```rust
//! use product_catalog::catalog::{CatalogEngine, Drafts};
//! use product_catalog::product_actor;
//! use product_catalog::store::ActorRecordStore;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (actor, client) = product_actor::new(16);
//! tokio::spawn(actor.run(()));
//!
//! let mut engine = CatalogEngine::new(ActorRecordStore::new(client));
//! engine.load_catalog().await?;
//!
//! engine.submit(&Drafts::new("Pen", "1.50", "Blue ink", "Stationery")).await?;
//! assert_eq!(engine.products().len(), 1);
//! assert_eq!(engine.products()[0].display_price(), "$1.50");
//! # Ok(())
//! # }
//! ```

mod engine;
pub mod error;
mod session;

pub use engine::CatalogEngine;
pub use error::CatalogError;
pub use session::{Drafts, EditSession};
