//! CLI command implementations.

pub mod cart;
pub mod catalog;

use rocketshoes_cart::{
    CartConfig, CartError, CartStore, FileStore, HttpCatalogSource, SourceError, TracingNotifier,
};
use thiserror::Error;

/// Errors that end a CLI command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog or stock could not be fetched.
    #[error("Catalog unavailable: {0}")]
    Source(#[from] SourceError),

    /// The cart rejected the operation (already reported to the user).
    #[error("Cart operation rejected: {0}")]
    Rejected(CartError),
}

/// Cart store backed by the configured cart file.
pub type FileCartStore = CartStore<FileStore, TracingNotifier>;

/// Open the cart without touching the network.
pub fn open_store(config: &CartConfig) -> FileCartStore {
    CartStore::open(
        FileStore::new(&config.cart_file),
        TracingNotifier,
        config.cart_key.clone(),
    )
}

/// Open the cart and load catalog and stock snapshots from the API.
pub async fn open_ready_store(config: &CartConfig) -> Result<FileCartStore, CliError> {
    let source = HttpCatalogSource::from_config(config)?;
    let mut store = open_store(config);
    store.load_snapshots(&source).await?;
    Ok(store)
}
