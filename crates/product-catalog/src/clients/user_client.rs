//! # User Client
//!
//! Domain wrapper around `ResourceClient<User>` used by the session gate.
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::EntityError(inner) => UserError::ValidationError(inner.to_string()),
            unreachable => UserError::ActorCommunicationError(unreachable.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Looks a user up by email, case-sensitively.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let users = self.inner.list().await.map_err(Self::map_error)?;
        Ok(users.into_iter().find(|user| user.email == email))
    }

    /// Asks the actor whether `password` matches the stored one.
    #[instrument(skip(self, password))]
    pub async fn verify_password(&self, id: UserId, password: &str) -> Result<bool, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, UserAction::VerifyPassword(password.to_string()))
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::VerifyPassword(matches) => Ok(matches),
        }
    }
}
