//! # Product Client
//!
//! Domain wrapper around `ResourceClient<Product>`. `get`, `list` and `delete` come from
//! [`ActorClient`]; creation and full replacement are spelled out here.
use crate::model::{Product, ProductFields, ProductId};
use crate::store::StoreError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => StoreError::NotFound(id),
            FrameworkError::EntityError(inner) => StoreError::Validation(inner.to_string()),
            unreachable => StoreError::Unavailable(unreachable.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, fields: ProductFields) -> Result<ProductId, StoreError> {
        debug!("Sending request");
        self.inner.create(fields).await.map_err(Self::map_error)
    }

    /// Replaces all fields of `id`, returning the stored record.
    #[instrument(skip(self))]
    pub async fn replace_product(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Product, StoreError> {
        debug!("Sending request");
        self.inner.update(id, fields).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_create, expect_update};

    #[tokio::test]
    async fn test_create_product_sends_fields() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .create_product(ProductFields::new("Pen", 1.5, "Blue ink", "Stationery"))
                .await
        });

        let (fields, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(fields.name, "Pen");
        assert_eq!(fields.price, 1.5);
        responder.send(Ok(ProductId(1))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), ProductId(1));
    }

    #[tokio::test]
    async fn test_replace_maps_missing_record_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .replace_product(
                    ProductId(9),
                    ProductFields::new("Pen", 2.0, "Blue ink", "Stationery"),
                )
                .await
        });

        let (id, _fields, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(9));
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(StoreError::NotFound("product_9".to_string())));
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ProductClient::map_error(FrameworkError::ActorClosed),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            ProductClient::map_error(FrameworkError::EntityError(Box::new(
                std::io::Error::other("name must not be empty")
            ))),
            StoreError::Validation(msg) if msg.contains("name must not be empty")
        ));
    }
}
