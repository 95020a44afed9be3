//! Product and stock data source.
//!
//! The cart only needs two read-only lists: the catalog and the stock levels.
//! [`HttpCatalogSource`] fetches them from the JSON API:
//!
//! - `GET {api_url}/products` - `[{ id, title, price, image }]`
//! - `GET {api_url}/stock` - `[{ id, amount }]`

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use rocketshoes_core::{Product, StockInfo};

use crate::config::CartConfig;

/// Errors that can occur when fetching catalog or stock data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Where the cart gets its catalog and stock snapshots from.
pub trait CatalogSource {
    /// Fetch the full product catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, SourceError>> + Send;

    /// Fetch stock levels for every product.
    fn stock(&self) -> impl Future<Output = Result<Vec<StockInfo>, SourceError>> + Send;
}

/// Catalog source backed by the product HTTP API.
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogSource {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Create a client from cart configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &CartConfig) -> Result<Self, SourceError> {
        Self::new(config.api_url.clone(), config.api_timeout)
    }

    /// GET a JSON list from `path`, relative to the base URL.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, SourceError> {
        let url = self.base_url.join(path)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let items: Vec<T> = response.json().await?;
        debug!(count = items.len(), "Fetched list");
        Ok(items)
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn products(&self) -> Result<Vec<Product>, SourceError> {
        self.get_list("products").await
    }

    async fn stock(&self) -> Result<Vec<StockInfo>, SourceError> {
        self.get_list("stock").await
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
