//! # User Actor
//!
//! Account records for the session gate. No context dependencies; one custom action,
//! [`UserAction::VerifyPassword`], so sign-in can check a password without the password
//! ever being copied out of the actor.

pub mod entity;
pub mod error;

pub use entity::{UserAction, UserActionResult};
pub use error::UserError;

use crate::clients::UserClient;
use crate::model::User;
use resource_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
