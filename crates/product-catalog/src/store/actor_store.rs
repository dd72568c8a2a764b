use super::{RecordStore, StoreError};
use crate::clients::ProductClient;
use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use resource_actor::ActorClient;
use tracing::debug;

/// Per-record store backed by the Product actor.
///
/// The actor answers requests in arrival order, so a write that has been acknowledged is
/// already part of the map the next `list` reads.
#[derive(Clone)]
pub struct ActorRecordStore {
    client: ProductClient,
}

impl ActorRecordStore {
    pub fn new(client: ProductClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for ActorRecordStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.client.list().await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        fields.validate().map_err(StoreError::Validation)?;
        let id = self.client.create_product(fields.clone()).await?;
        Ok(Product::new(id, fields))
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        self.client.replace_product(id, fields).await.map(|_| ())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        match self.client.delete(id).await {
            Err(StoreError::NotFound(_)) => {
                debug!(%id, "Delete of absent product ignored");
                Ok(())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_actor;
    use resource_actor::mock::MockClient;
    use resource_actor::FrameworkError;

    fn pen() -> ProductFields {
        ProductFields::new("Pen", 1.5, "Blue ink", "Stationery")
    }

    #[tokio::test]
    async fn test_create_then_list_sees_write() {
        let (actor, client) = product_actor::new(8);
        tokio::spawn(actor.run(()));
        let store = ActorRecordStore::new(client);

        let created = store.create(pen()).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_delete_missing_is_ok() {
        let (actor, client) = product_actor::new(8);
        tokio::spawn(actor.run(()));
        let store = ActorRecordStore::new(client);

        let update = store.update(ProductId(5), pen()).await;
        assert!(matches!(update, Err(StoreError::NotFound(_))));
        assert_eq!(store.delete(ProductId(5)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_invalid_fields_never_reach_actor() {
        // No expectations: any request would trip the mock.
        let mock = MockClient::<Product>::new();
        let store = ActorRecordStore::new(ProductClient::new(mock.client()));

        let result = store
            .create(ProductFields::new("", 1.0, "x", "Stationery"))
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_unavailable() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_delete(ProductId(1))
            .return_err(FrameworkError::ActorClosed);
        let store = ActorRecordStore::new(ProductClient::new(mock.client()));

        let result = store.delete(ProductId(1)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
