//! # Session Gate
//!
//! Sign-up, sign-in and the "current user" slot. Accounts live in the User actor; the gate
//! only ever asks the actor whether a password matches, it never reads one back.
//!
//! A gate built with [`SessionGate::open`] also records every account and the current
//! session in an [`AccountFile`], and reloads both when the application starts again.
//!
//! The catalog engine consumes [`SessionGate::current_user`] for display attribution and
//! nothing else.

pub mod account_file;
pub mod error;

pub use account_file::AccountFile;
pub use error::AuthError;

use crate::clients::UserClient;
use crate::model::{UserCreate, UserId};
use resource_actor::ActorClient;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

pub struct SessionGate {
    users: UserClient,
    current: RwLock<Option<String>>,
    file: Option<AccountFile>,
}

impl SessionGate {
    /// A gate whose accounts and session last only as long as the User actor.
    pub fn new(users: UserClient) -> Self {
        Self {
            users,
            current: RwLock::new(None),
            file: None,
        }
    }

    /// Loads the saved accounts into the User actor and restores the saved session.
    ///
    /// A missing or blank file starts with no accounts. A saved session whose account is
    /// not in the file is dropped.
    #[instrument(skip_all, fields(path = %file.path().display()))]
    pub async fn open(users: UserClient, file: AccountFile) -> Result<Self, AuthError> {
        let accounts = file.load().await?;

        let mut seen = HashSet::new();
        for account in accounts.users {
            if !seen.insert(account.email.clone()) {
                warn!(email = %account.email, "Duplicate saved account skipped");
                continue;
            }
            users
                .create_user(UserCreate {
                    email: account.email,
                    password: account.password,
                })
                .await?;
        }

        let current = match accounts.current_user {
            Some(email) if seen.contains(&email) => Some(email),
            Some(email) => {
                warn!(%email, "Saved session names an unknown account, ignoring");
                None
            }
            None => None,
        };

        info!(accounts = seen.len(), current = ?current, "Accounts restored");
        Ok(Self {
            users,
            current: RwLock::new(current),
            file: Some(file),
        })
    }

    pub fn users(&self) -> &UserClient {
        &self.users
    }

    /// Registers a new account. Does not sign in.
    ///
    /// When the account cannot be saved it is taken back out of the User actor and the
    /// call fails with [`AuthError::Unavailable`].
    #[instrument(skip(self, password, confirm))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<UserId, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::Validation(
                "email and password are required".to_string(),
            ));
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        // Serializes sign-ups so two of the same email cannot both pass the check below.
        let _current = self.current.write().await;
        if self.users.find_by_email(email).await?.is_some() {
            warn!("Email already registered");
            return Err(AuthError::AlreadyExists(email.to_string()));
        }

        let id = self
            .users
            .create_user(UserCreate {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        if let Some(file) = &self.file {
            if let Err(e) = file.add_account(email, password).await {
                if let Err(undo) = self.users.delete(id).await {
                    error!(%id, error = %undo, "Cannot withdraw unsaved account");
                }
                return Err(e);
            }
        }
        info!(%id, "Signed up");
        Ok(id)
    }

    /// Checks the credentials and makes `email` the current user, replacing any previous one.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.users.verify_password(user.id, password).await? {
            warn!(id = %user.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let mut current = self.current.write().await;
        if let Some(file) = &self.file {
            file.set_current_user(Some(user.email.as_str())).await?;
        }
        *current = Some(user.email);
        info!(id = %user.id, "Signed in");
        Ok(())
    }

    /// Clears the current user. Signing out twice is fine.
    ///
    /// Fails only when the cleared session cannot be saved; the user then stays signed in.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let mut current = self.current.write().await;
        if current.is_none() {
            return Ok(());
        }
        if let Some(file) = &self.file {
            file.set_current_user(None).await?;
        }
        if let Some(email) = current.take() {
            info!(%email, "Signed out");
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Option<String> {
        self.current.read().await.clone()
    }
}
