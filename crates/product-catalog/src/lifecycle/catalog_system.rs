use crate::catalog::CatalogEngine;
use crate::config::{CatalogConfig, StoreBackend};
use crate::session::{AccountFile, AuthError, SessionGate};
use crate::store::{ActorRecordStore, BlobRecordStore, RecordStore};
use crate::{product_actor, user_actor};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Store chosen at runtime from [`StoreConfig::backend`](crate::config::StoreConfig::backend).
pub type DynRecordStore = Box<dyn RecordStore>;

/// The running application: the session gate, the catalog engine, and the actor tasks
/// behind them.
///
/// # Example
///
/// ```ignore
/// let mut system = CatalogSystem::new(&CatalogConfig::default()).await?;
///
/// system.session.sign_up("alice@example.com", "pw", "pw").await?;
/// system.session.sign_in("alice@example.com", "pw").await?;
/// system.catalog.load_catalog().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    pub session: SessionGate,
    pub catalog: CatalogEngine<DynRecordStore>,
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns the User actor, plus the Product actor when the actor backend is selected,
    /// restores saved accounts and session, and builds the engine over the configured store.
    ///
    /// Fails when the accounts file exists but cannot be read.
    pub async fn new(config: &CatalogConfig) -> Result<Self, AuthError> {
        let capacity = config.store.channel_capacity;

        let (user_actor, user_client) = user_actor::new(capacity);
        let mut handles = vec![tokio::spawn(user_actor.run(()))];

        let session = match config.session.accounts_path() {
            Some(path) => SessionGate::open(user_client, AccountFile::new(path)).await?,
            None => SessionGate::new(user_client),
        };

        let store: DynRecordStore = match config.store.backend {
            StoreBackend::Actor => {
                let (product_actor, product_client) = product_actor::new(capacity);
                handles.push(tokio::spawn(product_actor.run(())));
                Box::new(ActorRecordStore::new(product_client))
            }
            StoreBackend::Blob => Box::new(BlobRecordStore::new(&config.store.blob_path)),
        };

        let mut catalog = CatalogEngine::new(store);
        if let Some(timeout) = config.store.timeout() {
            catalog = catalog.with_timeout(timeout);
        }

        info!(backend = ?config.store.backend, "Catalog system started");
        Ok(Self {
            session,
            catalog,
            handles,
        })
    }

    /// Drops every client, closing the actor mailboxes, then waits for the actor tasks.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system...");

        drop(self.catalog);
        drop(self.session);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
