//! Engine behaviour when the record store fails, driven through `MockClient` and through a
//! damaged blob file.

use product_catalog::catalog::{CatalogEngine, CatalogError, Drafts, EditSession};
use product_catalog::clients::ProductClient;
use product_catalog::model::{Product, ProductFields, ProductId};
use product_catalog::store::{ActorRecordStore, BlobRecordStore};
use resource_actor::mock::{create_mock_client, MockClient};
use resource_actor::FrameworkError;
use std::time::Duration;

fn engine_on(mock: &MockClient<Product>) -> CatalogEngine<ActorRecordStore> {
    CatalogEngine::new(ActorRecordStore::new(ProductClient::new(mock.client())))
}

fn pen() -> Product {
    Product::new(
        ProductId(1),
        ProductFields::new("Pen", 1.5, "Blue ink", "Stationery"),
    )
}

#[tokio::test]
async fn test_unavailable_create_keeps_drafts() {
    let mut mock = MockClient::<Product>::new();
    mock.expect_create().return_err(FrameworkError::ActorClosed);
    let mut engine = engine_on(&mock);

    *engine.drafts_mut() = Drafts::new("Pen", "1.50", "Blue ink", "Stationery");
    let drafts = engine.drafts().clone();
    let result = engine.submit(&drafts).await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(*engine.drafts(), drafts);
    assert!(engine.products().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_unavailable_update_keeps_session() {
    let mut mock = MockClient::<Product>::new();
    mock.expect_list().return_ok(vec![pen()]);
    mock.expect_update(ProductId(1))
        .return_err(FrameworkError::ActorDropped);
    let mut engine = engine_on(&mock);

    engine.load_catalog().await.unwrap();
    engine.begin_edit(ProductId(1)).unwrap();
    engine.drafts_mut().price = "2.00".into();
    let drafts = engine.drafts().clone();
    let result = engine.submit(&drafts).await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(engine.session(), EditSession::Editing(ProductId(1)));
    assert_eq!(engine.drafts().price, "2.00");
    assert_eq!(engine.products(), &[pen()]);
    mock.verify();
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let mut mock = MockClient::<Product>::new();
    mock.expect_list().return_ok(vec![pen()]);
    mock.expect_list().return_err(FrameworkError::ActorClosed);
    let mut engine = engine_on(&mock);

    engine.load_catalog().await.unwrap();
    let result = engine.load_catalog().await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(engine.products(), &[pen()]);
    mock.verify();
}

#[tokio::test]
async fn test_durable_write_with_failed_refresh_ends_session() {
    let mut repriced = pen();
    repriced.price = 2.0;

    let mut mock = MockClient::<Product>::new();
    mock.expect_list().return_ok(vec![pen()]);
    mock.expect_update(ProductId(1)).return_ok(repriced);
    mock.expect_list().return_err(FrameworkError::ActorClosed);
    let mut engine = engine_on(&mock);

    engine.load_catalog().await.unwrap();
    engine.begin_edit(ProductId(1)).unwrap();
    let result = engine
        .submit(&Drafts::new("Pen", "2", "Blue ink", "Stationery"))
        .await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(engine.session(), EditSession::Idle);
    assert!(engine.drafts().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_failed_delete_keeps_session() {
    let mut mock = MockClient::<Product>::new();
    mock.expect_list().return_ok(vec![pen()]);
    mock.expect_delete(ProductId(1))
        .return_err(FrameworkError::ActorClosed);
    let mut engine = engine_on(&mock);

    engine.load_catalog().await.unwrap();
    engine.begin_edit(ProductId(1)).unwrap();
    let result = engine.remove(ProductId(1)).await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(engine.editing(), Some(ProductId(1)));
    assert_eq!(engine.products().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_unresponsive_store_times_out() {
    // Requests are queued but never answered.
    let (client, _receiver) = create_mock_client::<Product>(8);
    let mut engine = CatalogEngine::new(ActorRecordStore::new(ProductClient::new(client)))
        .with_timeout(Duration::from_millis(50));

    let result = engine.load_catalog().await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(msg)) if msg.contains("timed out")));
}

#[tokio::test]
async fn test_damaged_blob_file_mid_edit_keeps_drafts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let mut engine = CatalogEngine::new(BlobRecordStore::new(&path));

    engine
        .submit(&Drafts::new("Pen", "1.50", "Blue ink", "Stationery"))
        .await
        .unwrap();
    let id = engine.products()[0].id;
    engine.begin_edit(id).unwrap();
    engine.drafts_mut().price = "2.00".into();
    let drafts = engine.drafts().clone();

    std::fs::write(&path, b"{ truncated").unwrap();
    let result = engine.submit(&drafts).await;

    assert!(matches!(result, Err(CatalogError::StoreUnavailable(_))));
    assert_eq!(engine.session(), EditSession::Editing(id));
    assert_eq!(*engine.drafts(), drafts);
    assert_eq!(engine.products().len(), 1);
    assert_eq!(engine.products()[0].price, 1.5);
    assert_eq!(std::fs::read(&path).unwrap(), b"{ truncated");
}
