//! Integration tests for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `http_source` - HTTP catalog source against an in-process API
//! - `cart_persistence` - cart store end to end with the file store
//!
//! The helpers here start a throwaway product API on `127.0.0.1:0` and hand
//! out unique temp paths, so tests need no external services.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_core::{Price, Product, ProductId, StockInfo};
use tokio::task::JoinHandle;
use url::Url;

/// A running test API. The server stops when this is dropped.
pub struct TestApi {
    pub base_url: Url,
    handle: JoinHandle<()>,
}

impl Drop for TestApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start an API serving `products` at `/products` and `stock` at `/stock`.
pub async fn spawn_api(products: Vec<Product>, stock: Vec<StockInfo>) -> TestApi {
    let products = Arc::new(products);
    let stock = Arc::new(stock);

    let app = Router::new()
        .route(
            "/products",
            get(move || {
                let products = Arc::clone(&products);
                async move { Json(products.as_ref().clone()) }
            }),
        )
        .route(
            "/stock",
            get(move || {
                let stock = Arc::clone(&stock);
                async move { Json(stock.as_ref().clone()) }
            }),
        );

    serve(app).await
}

/// Start an API whose `/stock` answers with `status` while `/products` works.
pub async fn spawn_api_with_stock_status(products: Vec<Product>, status: StatusCode) -> TestApi {
    let products = Arc::new(products);

    let app = Router::new()
        .route(
            "/products",
            get(move || {
                let products = Arc::clone(&products);
                async move { Json(products.as_ref().clone()) }
            }),
        )
        .route("/stock", get(move || async move { (status, "stock unavailable") }));

    serve(app).await
}

async fn serve(app: Router) -> TestApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestApi {
        base_url: Url::parse(&format!("http://{addr}")).unwrap(),
        handle,
    }
}

/// A unique, not-yet-created file path under the system temp dir.
#[must_use]
pub fn temp_cart_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("rocketshoes-it-{}", uuid::Uuid::new_v4()))
        .join("cart.json")
}

/// The storefront's shoe catalog.
#[must_use]
pub fn shoe_catalog() -> Vec<Product> {
    let shoe = |id: i32, title: &str, cents: i64, image: &str| Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(cents),
        image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/{image}"),
    };

    vec![
        shoe(1, "Tênis de Caminhada Leve Confortável", 17990, "tenis1.jpg"),
        shoe(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, "tenis2.jpg"),
        shoe(3, "Tênis Adidas Duramo Lite 2.0", 21990, "tenis3.jpg"),
        shoe(4, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, "tenis2.jpg"),
        shoe(5, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, "tenis2.jpg"),
        shoe(6, "Tênis Adidas Duramo Lite 2.0", 21990, "tenis3.jpg"),
    ]
}

/// Stock levels matching [`shoe_catalog`].
#[must_use]
pub fn shoe_stock() -> Vec<StockInfo> {
    [(1, 3), (2, 5), (3, 2), (4, 1), (5, 5), (6, 10)]
        .into_iter()
        .map(|(id, amount)| StockInfo {
            id: ProductId::new(id),
            amount,
        })
        .collect()
}
