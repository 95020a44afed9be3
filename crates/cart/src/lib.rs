//! RocketShoes cart library.
//!
//! Stock-aware shopping cart state with durable persistence:
//!
//! - [`store`] - [`CartStore`]: add, remove and update operations
//! - [`storage`] - key-value persistence (memory and file backends)
//! - [`source`] - catalog and stock data source (HTTP API client)
//! - [`notify`] - user-facing failure notifications
//! - [`config`] - environment configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use rocketshoes_cart::{
//!     CartConfig, CartStore, FileStore, HttpCatalogSource, TracingNotifier,
//!     UpdateProductAmount,
//! };
//! use rocketshoes_core::ProductId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::from_env()?;
//! let mut store = CartStore::open(
//!     FileStore::new(&config.cart_file),
//!     TracingNotifier,
//!     config.cart_key.clone(),
//! );
//!
//! store
//!     .load_snapshots(&HttpCatalogSource::from_config(&config)?)
//!     .await?;
//!
//! let _ = store.add_product(ProductId::new(1));
//! let _ = store.update_product_amount(UpdateProductAmount {
//!     product_id: ProductId::new(1),
//!     amount: 2,
//! });
//! println!("{} products in cart", store.cart().len());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod notify;
pub mod snapshot;
pub mod source;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Operation};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use snapshot::Snapshots;
pub use source::{CatalogSource, HttpCatalogSource, SourceError};
pub use storage::{CartRepository, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, Outcome, UpdateProductAmount};
