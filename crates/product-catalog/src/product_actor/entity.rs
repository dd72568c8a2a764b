//! [`ActorEntity`] implementation for [`Product`].
//!
//! Products have no custom actions; the actor only needs create, list, replace and delete.

use super::error::ProductError;
use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

/// Products support no record-specific actions.
#[derive(Debug, Clone)]
pub enum ProductAction {}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductFields;
    type Update = ProductFields;
    type Action = ProductAction;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductFields) -> Result<Self, Self::Error> {
        params.validate().map_err(ProductError::Invalid)?;
        Ok(Self::new(id, params))
    }

    /// Replaces all four fields at once.
    async fn on_update(
        &mut self,
        update: ProductFields,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        update.validate().map_err(ProductError::Invalid)?;
        self.apply(update);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
