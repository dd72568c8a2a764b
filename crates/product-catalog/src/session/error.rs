//! Error types for the session gate.

use crate::user_actor::UserError;
use thiserror::Error;

/// Sign-up and sign-in failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Unknown email and wrong password look the same to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::ValidationError(msg) => AuthError::Validation(msg),
            // The account vanished between lookup and verification.
            UserError::NotFound(_) => AuthError::InvalidCredentials,
            UserError::ActorCommunicationError(msg) => AuthError::Unavailable(msg),
        }
    }
}
