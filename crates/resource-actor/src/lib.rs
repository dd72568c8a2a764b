//! # Resource Actor
//!
//! Foundational building blocks for keeping a collection of records inside a single
//! Tokio task and talking to it through a typed handle. The pattern is a
//! **Resource-Oriented** actor: every record type gets the same CRUD + List + Action
//! surface, and the actor processes requests one at a time so its state never needs a lock.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record type and its lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop that owns the records
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed, cloneable handles
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Note {
//!     id: u32,
//!     text: String,
//! }
//!
//! #[derive(Debug)] struct NoteCreate { text: String }
//! #[derive(Debug)] struct NoteUpdate { text: String }
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32;
//!     type Create = NoteCreate;
//!     type Update = NoteUpdate;
//!     type Action = NoteAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = NoteError;
//!
//!     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, text: params.text })
//!     }
//!
//!     async fn on_update(&mut self, update: NoteUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         self.text = update.text;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: NoteAction, _ctx: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Note>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let first = client.create(NoteCreate { text: "first".into() }).await.unwrap();
//!     let second = client.create(NoteCreate { text: "second".into() }).await.unwrap();
//!
//!     // Listing follows id order, which is creation order.
//!     let all = client.list().await.unwrap();
//!     assert_eq!(all.iter().map(|n| n.id).collect::<Vec<_>>(), vec![first, second]);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor, so two
//! actors can be created first and wired afterwards.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed **sequentially** within an actor
//! - A write acknowledged to the client is visible to every later request
//!
//! ## Testing
//!
//! The [`mock`] module provides [`mock::MockClient`] and channel-level helpers so client
//! code can be tested without spawning a real actor, including failure injection.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
