use super::AuthError;
use crate::store::file::{read_document, replace_document};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Saved accounts plus the signed-in email, as one JSON document.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Accounts {
    #[serde(default)]
    pub users: Vec<SavedAccount>,
    #[serde(default)]
    pub current_user: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedAccount {
    pub email: String,
    pub password: String,
}

/// The JSON file that keeps accounts and the current session across restarts.
///
/// Each change reads the document, edits it and writes it back through a temp file and a
/// rename, so the file is never left half-written.
#[derive(Debug)]
pub struct AccountFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AccountFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, action: &str, err: impl std::fmt::Display) -> AuthError {
        warn!(path = %self.path.display(), action, error = %err, "Account file failure");
        AuthError::Unavailable(format!("cannot {action} {}: {err}", self.path.display()))
    }

    pub(crate) async fn load(&self) -> Result<Accounts, AuthError> {
        match read_document(&self.path).await {
            Ok(None) => Ok(Accounts::default()),
            Ok(Some(bytes)) => {
                serde_json::from_slice(&bytes).map_err(|e| self.unavailable("parse", e))
            }
            Err(e) => Err(self.unavailable("read", e)),
        }
    }

    async fn save(&self, accounts: &Accounts) -> Result<(), AuthError> {
        let bytes =
            serde_json::to_vec_pretty(accounts).map_err(|e| self.unavailable("encode", e))?;
        replace_document(&self.path, &bytes)
            .await
            .map_err(|e| self.unavailable("write", e))?;
        debug!(path = %self.path.display(), accounts = accounts.users.len(), "Accounts written");
        Ok(())
    }

    async fn modify(&self, change: impl FnOnce(&mut Accounts)) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().await;
        let mut accounts = self.load().await?;
        change(&mut accounts);
        self.save(&accounts).await
    }

    pub(crate) async fn add_account(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.modify(|accounts| {
            accounts.users.push(SavedAccount {
                email: email.to_string(),
                password: password.to_string(),
            })
        })
        .await
    }

    pub(crate) async fn set_current_user(&self, email: Option<&str>) -> Result<(), AuthError> {
        self.modify(|accounts| accounts.current_user = email.map(str::to_string))
            .await
    }
}
