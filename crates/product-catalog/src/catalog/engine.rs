use super::error::CatalogError;
use super::session::{Drafts, EditSession};
use crate::model::{Product, ProductId};
use crate::store::{RecordStore, StoreError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// In-memory view of the catalog plus the state of the edit form.
///
/// Every mutation goes to the store first and is followed by a full [`load_catalog`], so
/// the list returned by [`products`] is always a copy of what the store last reported.
///
/// [`load_catalog`]: CatalogEngine::load_catalog
/// [`products`]: CatalogEngine::products
pub struct CatalogEngine<S: RecordStore> {
    store: Arc<S>,
    products: Vec<Product>,
    session: EditSession,
    drafts: Drafts,
    timeout: Option<Duration>,
    attribution: Option<String>,
}

impl<S: RecordStore + 'static> CatalogEngine<S> {
    /// Creates an engine with an empty list. Call [`load_catalog`](Self::load_catalog)
    /// before showing anything.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            products: Vec::new(),
            session: EditSession::Idle,
            drafts: Drafts::default(),
            timeout: None,
            attribution: None,
        }
    }

    /// Bounds every store call. An elapsed call is reported as
    /// [`CatalogError::StoreUnavailable`]; the call itself keeps running to completion in
    /// its own task, so a slow write still lands.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn editing(&self) -> Option<ProductId> {
        match self.session {
            EditSession::Editing(id) => Some(id),
            EditSession::Idle => None,
        }
    }

    pub fn drafts(&self) -> &Drafts {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut Drafts {
        &mut self.drafts
    }

    pub fn store(&self) -> &S {
        self.store.as_ref()
    }

    /// Who the catalog is shown for. Display only; never sent to the store.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    pub fn set_attribution(&mut self, user: Option<String>) {
        self.attribution = user;
    }

    /// Replaces the whole in-memory list with the store's contents.
    ///
    /// A session pointing at a product that is no longer listed is cleared. On failure the
    /// previous list is kept.
    #[instrument(skip(self))]
    pub async fn load_catalog(&mut self) -> Result<&[Product], CatalogError> {
        let listed = self
            .guarded("list", |store| async move { store.list().await })
            .await;
        let products = match listed {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous list");
                return Err(e);
            }
        };
        self.products = products;

        if let EditSession::Editing(id) = self.session {
            if !self.contains(id) {
                info!(%id, "Edited product is gone, clearing session");
                self.clear_session();
            }
        }

        debug!(size = self.products.len(), "Catalog loaded");
        Ok(&self.products)
    }

    /// Switches the form to "new product" with empty drafts.
    pub fn begin_create(&mut self) {
        self.clear_session();
    }

    /// Selects `id` for editing and copies its fields into the drafts.
    ///
    /// Fails with [`CatalogError::NotFound`] and changes nothing if `id` is not in the
    /// current list.
    pub fn begin_edit(&mut self, id: ProductId) -> Result<(), CatalogError> {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            warn!(%id, "Cannot edit unknown product");
            return Err(CatalogError::NotFound(id.to_string()));
        };
        self.drafts = Drafts::from_product(product);
        self.session = EditSession::Editing(id);
        debug!(%id, "Editing");
        Ok(())
    }

    /// Writes `drafts` to the store: an update while editing, otherwise a create. Then
    /// refreshes and returns to [`EditSession::Idle`].
    ///
    /// Invalid drafts and failed writes leave the list, the session and the drafts as they
    /// were. An update that finds its product gone refreshes, drops the session and
    /// reports [`CatalogError::NotFound`]. A write that lands but whose refresh fails still
    /// ends the session, since the change is already durable.
    #[instrument(skip(self, drafts))]
    pub async fn submit(&mut self, drafts: &Drafts) -> Result<(), CatalogError> {
        let fields = drafts.parse()?;

        match self.session {
            EditSession::Editing(id) => {
                let updated = self
                    .guarded("update", move |store| async move {
                        store.update(id, fields).await
                    })
                    .await;
                match updated {
                    Ok(()) => info!(%id, "Updated"),
                    Err(CatalogError::NotFound(msg)) => {
                        warn!(%id, "Product vanished before update");
                        if let Err(e) = self.load_catalog().await {
                            debug!(error = %e, "Refresh after lost update failed");
                        }
                        self.clear_session();
                        return Err(CatalogError::NotFound(msg));
                    }
                    Err(e) => return Err(e),
                }
            }
            EditSession::Idle => {
                let product = self
                    .guarded("create", move |store| async move {
                        store.create(fields).await
                    })
                    .await?;
                info!(id = %product.id, "Created");
            }
        }

        let refreshed = self.load_catalog().await.map(|_| ());
        self.clear_session();
        refreshed
    }

    /// Deletes `id` from the store and refreshes. Removing an absent product succeeds.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: ProductId) -> Result<(), CatalogError> {
        self.guarded("delete", move |store| async move { store.delete(id).await })
            .await?;
        info!(%id, "Removed");

        if self.session == EditSession::Editing(id) {
            self.clear_session();
        }
        self.load_catalog().await?;
        Ok(())
    }

    /// Leaves edit mode and empties the drafts.
    pub fn cancel_edit(&mut self) {
        self.clear_session();
    }

    fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    fn clear_session(&mut self) {
        self.session = EditSession::Idle;
        self.drafts = Drafts::default();
    }

    /// Runs one store call. Without a timeout the call is awaited in place. With one, it is
    /// spawned and only the wait is bounded: an elapsed call is detached, not cancelled.
    async fn guarded<R, F, Fut>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Result<R, CatalogError>
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: Future<Output = Result<R, StoreError>> + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let Some(limit) = self.timeout else {
            return call(store).await.map_err(CatalogError::from);
        };

        let mut task = tokio::spawn(call(store));
        match tokio::time::timeout(limit, &mut task).await {
            Ok(Ok(result)) => result.map_err(CatalogError::from),
            Ok(Err(e)) => {
                warn!(operation, error = %e, "Store task failed");
                Err(CatalogError::StoreUnavailable(format!("{operation} failed: {e}")))
            }
            Err(_) => {
                warn!(operation, ?limit, "Store call timed out, left running");
                Err(CatalogError::StoreUnavailable(format!(
                    "{operation} timed out after {limit:?}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductFields;
    use crate::product_actor;
    use crate::store::ActorRecordStore;

    fn engine() -> CatalogEngine<ActorRecordStore> {
        let (actor, client) = product_actor::new(16);
        tokio::spawn(actor.run(()));
        CatalogEngine::new(ActorRecordStore::new(client))
    }

    fn pen() -> Drafts {
        Drafts::new("Pen", "1.50", "Blue ink", "Stationery")
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id_changes_nothing() {
        let mut engine = engine();
        engine.drafts_mut().name = "typed".into();

        let result = engine.begin_edit(ProductId(42));

        assert_eq!(result, Err(CatalogError::NotFound("product_42".into())));
        assert_eq!(engine.session(), EditSession::Idle);
        assert_eq!(engine.drafts().name, "typed");
    }

    #[tokio::test]
    async fn test_begin_edit_copies_fields() {
        let mut engine = engine();
        engine.submit(&pen()).await.unwrap();
        let id = engine.products()[0].id;

        engine.begin_edit(id).unwrap();

        assert_eq!(engine.editing(), Some(id));
        assert_eq!(*engine.drafts(), Drafts::new("Pen", "1.5", "Blue ink", "Stationery"));
    }

    #[tokio::test]
    async fn test_cancel_then_begin_create_yields_empty_drafts() {
        let mut engine = engine();
        engine.submit(&pen()).await.unwrap();
        let id = engine.products()[0].id;

        engine.begin_edit(id).unwrap();
        engine.begin_create();
        assert!(engine.drafts().is_empty());
        assert_eq!(engine.session(), EditSession::Idle);

        engine.begin_edit(id).unwrap();
        engine.cancel_edit();
        assert!(engine.drafts().is_empty());
        assert_eq!(engine.editing(), None);
    }

    #[tokio::test]
    async fn test_refresh_clears_session_for_vanished_product() {
        let mut engine = engine();
        engine.submit(&pen()).await.unwrap();
        let id = engine.products()[0].id;
        engine.begin_edit(id).unwrap();

        // Removed behind the engine's back.
        engine.store().delete(id).await.unwrap();
        engine.load_catalog().await.unwrap();

        assert!(engine.products().is_empty());
        assert_eq!(engine.session(), EditSession::Idle);
        assert!(engine.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_vanished_product_reports_not_found() {
        let mut engine = engine();
        engine.submit(&pen()).await.unwrap();
        let id = engine.products()[0].id;
        engine.begin_edit(id).unwrap();
        engine.store().delete(id).await.unwrap();

        let result = engine.submit(&Drafts::new("Pen", "2", "Blue ink", "Stationery")).await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert!(engine.products().is_empty());
        assert_eq!(engine.session(), EditSession::Idle);
    }

    #[tokio::test]
    async fn test_form_requires_description_the_store_would_accept() {
        let mut engine = engine();
        let created = engine
            .store()
            .create(ProductFields::new("Pen", 1.0, "", "Stationery"))
            .await
            .unwrap();
        engine.load_catalog().await.unwrap();

        // Accepted by the store, but the form insists on a description.
        engine.begin_edit(created.id).unwrap();
        let drafts = engine.drafts().clone();
        let result = engine.submit(&drafts).await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert_eq!(engine.editing(), Some(created.id));
    }

    /// In-memory store whose `create` takes `delay` before it writes.
    struct SlowStore {
        delay: Duration,
        records: tokio::sync::Mutex<Vec<Product>>,
    }

    #[async_trait::async_trait]
    impl RecordStore for SlowStore {
        async fn list(&self) -> Result<Vec<Product>, StoreError> {
            Ok(self.records.lock().await.clone())
        }

        async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
            tokio::time::sleep(self.delay).await;
            let mut records = self.records.lock().await;
            let product = Product::new(ProductId(records.len() as u64 + 1), fields);
            records.push(product.clone());
            Ok(product)
        }

        async fn update(&self, id: ProductId, _: ProductFields) -> Result<(), StoreError> {
            Err(StoreError::NotFound(id.to_string()))
        }

        async fn delete(&self, _: ProductId) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_timed_out_write_still_lands() {
        let store = SlowStore {
            delay: Duration::from_millis(100),
            records: Default::default(),
        };
        let mut engine = CatalogEngine::new(store).with_timeout(Duration::from_millis(20));

        let result = engine.submit(&pen()).await;
        assert!(
            matches!(&result, Err(CatalogError::StoreUnavailable(msg)) if msg.contains("timed out")),
            "{result:?}"
        );
        assert!(engine.products().is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(engine.store().list().await.unwrap().len(), 1);
        engine.load_catalog().await.unwrap();
        assert_eq!(engine.products()[0].name, "Pen");
    }

    #[test]
    fn test_attribution() {
        let (_actor, client) = product_actor::new(1);
        let mut engine = CatalogEngine::new(ActorRecordStore::new(client));
        assert_eq!(engine.attribution(), None);
        engine.set_attribution(Some("alice@example.com".into()));
        assert_eq!(engine.attribution(), Some("alice@example.com"));
    }
}
