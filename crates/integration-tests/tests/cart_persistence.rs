//! End-to-end tests for the cart store.
//!
//! These drive `CartStore` the way an application does: open from the file
//! store, load snapshots over HTTP, mutate, then reopen to simulate a restart.

use std::sync::Arc;

use axum::http::StatusCode;
use rocketshoes_cart::{
    CartError, CartStore, FileStore, HttpCatalogSource, KeyValueStore, Outcome,
    RecordingNotifier, UpdateProductAmount,
};
use rocketshoes_cart::config::DEFAULT_CART_KEY;
use rocketshoes_cart::error::{ADD_FAILED, OUT_OF_STOCK};
use rocketshoes_core::{Price, Product, ProductId, StockInfo};
use rocketshoes_integration_tests::{
    shoe_catalog, shoe_stock, spawn_api, spawn_api_with_stock_status, temp_cart_file,
};

fn id(n: i32) -> ProductId {
    ProductId::new(n)
}

fn source_for(base_url: &url::Url) -> HttpCatalogSource {
    HttpCatalogSource::new(base_url.clone(), std::time::Duration::from_secs(5)).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_add_three_times_with_stock_of_two() {
    let catalog = vec![Product {
        id: id(1),
        title: "Shoe".to_string(),
        price: Price::from_cents(1000),
        image: "x".to_string(),
    }];
    let stock = vec![StockInfo {
        id: id(1),
        amount: 2,
    }];
    let api = spawn_api(catalog, stock).await;
    let notifier = Arc::new(RecordingNotifier::new());

    let mut store = CartStore::open(
        FileStore::new(temp_cart_file()),
        Arc::clone(&notifier),
        DEFAULT_CART_KEY,
    );
    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();

    assert!(store.add_product(id(1)).is_applied());
    let line = store.cart().get(id(1)).unwrap();
    assert_eq!(line.amount, 1);
    assert_eq!(line.title, "Shoe");
    assert_eq!(line.price, Price::from_cents(1000));
    assert_eq!(line.image, "x");

    assert!(store.add_product(id(1)).is_applied());
    assert_eq!(store.cart().get(id(1)).unwrap().amount, 2);

    let before = store.cart().clone();
    assert!(store.add_product(id(1)).is_failed());
    assert_eq!(store.cart(), &before);
    assert_eq!(notifier.messages(), vec![ADD_FAILED]);
}

#[tokio::test]
async fn test_zero_amount_update_leaves_cart_unchanged() {
    let api = spawn_api(shoe_catalog(), shoe_stock()).await;
    let mut store = CartStore::open(
        FileStore::new(temp_cart_file()),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();
    let _ = store.add_product(id(1));
    let before = store.cart().clone();

    let outcome = store.update_product_amount(UpdateProductAmount {
        product_id: id(1),
        amount: 0,
    });

    assert!(matches!(outcome, Outcome::Unchanged));
    assert_eq!(store.cart(), &before);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let path = temp_cart_file();
    let api = spawn_api(shoe_catalog(), shoe_stock()).await;

    let expected = {
        let mut store = CartStore::open(
            FileStore::new(&path),
            RecordingNotifier::new(),
            DEFAULT_CART_KEY,
        );
        store.load_snapshots(&source_for(&api.base_url)).await.unwrap();

        let _ = store.add_product(id(3));
        let _ = store.add_product(id(1));
        let _ = store.add_product(id(6));
        let _ = store.update_product_amount(UpdateProductAmount {
            product_id: id(6),
            amount: 7,
        });
        let _ = store.remove_product(id(1));
        store.cart().clone()
    };

    let reopened = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );

    assert_eq!(reopened.cart(), &expected);
    let ids: Vec<i32> = reopened.cart().items().iter().map(|i| i.id.as_i32()).collect();
    assert_eq!(ids, vec![3, 6]);
    assert_eq!(reopened.cart().get(id(6)).unwrap().amount, 7);
    assert_eq!(reopened.cart().total(), Price::from_cents(21990 + 7 * 21990));
}

#[tokio::test]
async fn test_persisted_value_is_a_json_array_under_the_cart_key() {
    let path = temp_cart_file();
    let api = spawn_api(shoe_catalog(), shoe_stock()).await;
    let mut store = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();
    let _ = store.add_product(id(2));

    let raw = FileStore::new(&path).get(DEFAULT_CART_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    let item = items.first().unwrap();
    assert_eq!(item["id"], 2);
    assert_eq!(item["amount"], 1);
    assert_eq!(item["price"], 139.9);
}

#[tokio::test]
async fn test_corrupt_cart_file_starts_empty_and_is_repaired() {
    let path = temp_cart_file();
    let file_store = FileStore::new(&path);
    file_store.set(DEFAULT_CART_KEY, "[{\"id\": \"oops\"}]").unwrap();

    let api = spawn_api(shoe_catalog(), shoe_stock()).await;
    let mut store = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    assert!(store.cart().is_empty());

    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();
    assert!(store.add_product(id(4)).is_applied());

    let reopened = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    assert_eq!(reopened.cart().len(), 1);
}

#[tokio::test]
async fn test_unreadable_cart_file_is_replaced_on_first_add() {
    let path = temp_cart_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let api = spawn_api(shoe_catalog(), shoe_stock()).await;
    let mut store = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    assert!(store.cart().is_empty());

    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();
    assert!(matches!(store.add_product(id(2)), Outcome::Applied));
    assert!(store.add_product(id(2)).is_applied());

    let reopened = CartStore::open(
        FileStore::new(&path),
        RecordingNotifier::new(),
        DEFAULT_CART_KEY,
    );
    assert_eq!(reopened.cart(), store.cart());
    assert_eq!(reopened.cart().get(id(2)).map(|line| line.amount), Some(2));
}

// =============================================================================
// Snapshot loading
// =============================================================================

#[tokio::test]
async fn test_failed_snapshot_load_keeps_store_gated() {
    let api = spawn_api_with_stock_status(shoe_catalog(), StatusCode::INTERNAL_SERVER_ERROR).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut store = CartStore::open(
        FileStore::new(temp_cart_file()),
        Arc::clone(&notifier),
        DEFAULT_CART_KEY,
    );

    assert!(store.load_snapshots(&source_for(&api.base_url)).await.is_err());
    assert!(!store.is_ready());

    let outcome = store.add_product(id(1));
    assert!(matches!(outcome.error(), Some(CartError::NotReady)));
    assert!(store.cart().is_empty());
    assert_eq!(notifier.messages(), vec![ADD_FAILED]);
}

#[tokio::test]
async fn test_stock_limits_from_api_are_enforced() {
    let api = spawn_api(shoe_catalog(), shoe_stock()).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut store = CartStore::open(
        FileStore::new(temp_cart_file()),
        Arc::clone(&notifier),
        DEFAULT_CART_KEY,
    );
    store.load_snapshots(&source_for(&api.base_url)).await.unwrap();

    // Product 4 has a single unit in stock
    assert!(store.add_product(id(4)).is_applied());
    assert!(store.add_product(id(4)).is_failed());

    let _ = store.add_product(id(2));
    let outcome = store.update_product_amount(UpdateProductAmount {
        product_id: id(2),
        amount: 6,
    });
    assert!(outcome.is_failed());
    assert_eq!(store.cart().get(id(2)).unwrap().amount, 1);

    assert_eq!(notifier.messages(), vec![ADD_FAILED, OUT_OF_STOCK]);
}
