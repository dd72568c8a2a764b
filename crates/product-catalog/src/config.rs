//! Runtime configuration, read from TOML.
//!
//! ```toml
//! [store]
//! backend = "blob"            # or "actor"
//! blob_path = "data/products.json"
//! channel_capacity = 32
//! timeout_ms = 2000           # optional
//!
//! [session]
//! persist = true              # false keeps accounts in memory only
//! accounts_path = "data/accounts.json"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional; missing ones take the [`Default`] values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Files tried by [`CatalogConfig::load`], in order.
pub const SEARCH_PATHS: [&str; 2] = ["catalog.toml", "./config/catalog.toml"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub store: StoreConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Where products are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Records live in a Product actor for the lifetime of the process.
    Actor,
    /// The whole catalog is one JSON file.
    #[default]
    Blob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Only read by the blob backend.
    pub blob_path: PathBuf,
    /// Mailbox size of each actor.
    pub channel_capacity: usize,
    /// Per-call limit on store operations. No limit when absent.
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            blob_path: PathBuf::from("data/products.json"),
            channel_capacity: 32,
            timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Where accounts and the signed-in user are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub persist: bool,
    /// JSON file holding accounts and the current session.
    pub accounts_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: true,
            accounts_path: PathBuf::from("data/accounts.json"),
        }
    }
}

impl SessionConfig {
    /// The accounts file, or `None` when accounts are not persisted.
    pub fn accounts_path(&self) -> Option<&Path> {
        self.persist.then_some(self.accounts_path.as_path())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set, in `EnvFilter` syntax.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// First file in [`SEARCH_PATHS`] that exists, else defaults. The result is validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match SEARCH_PATHS.iter().map(Path::new).find(|p| p.exists()) {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "store.channel_capacity must be greater than 0".to_string(),
            ));
        }
        if self.store.timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "store.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.store.backend == StoreBackend::Blob && self.store.blob_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "store.blob_path is required for the blob backend".to_string(),
            ));
        }
        if self.session.persist && self.session.accounts_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "session.accounts_path is required when session.persist is set".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::Validation(format!(
                "invalid logging.level {:?}: {e}",
                self.logging.level
            ))
        })?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    FileRead(String),
    #[error("Cannot parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = CatalogConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Blob);
        assert_eq!(config.store.timeout(), None);
        assert_eq!(
            config.session.accounts_path(),
            Some(Path::new("data/accounts.json"))
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = CatalogConfig::from_toml(
            r#"
            [store]
            backend = "actor"
            timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.store.backend, StoreBackend::Actor);
        assert_eq!(config.store.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.store.channel_capacity, 32);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[store]\nblob_path = \"/tmp/x.json\"\n[session]\naccounts_path = \"/tmp/a.json\"\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = CatalogConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.store.blob_path, PathBuf::from("/tmp/x.json"));
        assert_eq!(config.session.accounts_path(), Some(Path::new("/tmp/a.json")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            CatalogConfig::load_from_file("/definitely/not/here.toml"),
            Err(ConfigError::FileRead(_))
        ));
        assert!(matches!(
            CatalogConfig::from_toml("[store]\nbackend = \"sqlite\""),
            Err(ConfigError::Parse(_))
        ));

        let mut config = CatalogConfig::default();
        config.store.channel_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = CatalogConfig::default();
        config.session.accounts_path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.session.persist = false;
        config.validate().unwrap();
        assert_eq!(config.session.accounts_path(), None);

        let mut config = CatalogConfig::default();
        config.logging.level = "info,[".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
