//! [`ActorEntity`] implementation for [`User`].

use super::error::UserError;
use crate::model::{User, UserCreate, UserId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

/// Custom actions for User entities.
#[derive(Clone)]
pub enum UserAction {
    /// Compares a candidate password with the stored one without revealing it.
    VerifyPassword(String),
}

impl std::fmt::Debug for UserAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerifyPassword(_) => f.write_str("VerifyPassword(***)"),
        }
    }
}

/// Results from UserActions - variants match 1:1 with UserAction.
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    VerifyPassword(bool),
}

fn require(field: &str, value: &str) -> Result<(), UserError> {
    if value.trim().is_empty() {
        return Err(UserError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    /// Accounts are never edited after sign-up.
    type Update = ();
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        require("email", &params.email)?;
        require("password", &params.password)?;
        Ok(Self::new(id, params.email, params.password))
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &Self::Context,
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::VerifyPassword(candidate) => {
                Ok(UserActionResult::VerifyPassword(candidate == self.password))
            }
        }
    }
}
