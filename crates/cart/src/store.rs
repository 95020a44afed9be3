//! The cart store.
//!
//! [`CartStore`] owns the in-memory cart, the catalog and stock snapshots,
//! a durable store and a notifier. Each mutating operation is a single
//! read-validate-write step:
//!
//! 1. Build a candidate cart from the current one (the current one is never touched)
//! 2. Write the candidate to the durable store
//! 3. Only then replace the in-memory cart
//!
//! Any failure along the way leaves the cart as it was, is logged, and is
//! reported to the notifier with a message for the operation that failed.
//!
//! Adding and changing amounts need stock data, so they are rejected with
//! [`CartError::NotReady`] until snapshots are installed. Removing works at
//! any time.

use tracing::{debug, error, info, instrument, warn};

use rocketshoes_core::{Cart, CartItem, Product, ProductId, StockInfo};

use crate::error::{CartError, Operation};
use crate::notify::{Notification, Notifier};
use crate::snapshot::Snapshots;
use crate::source::{CatalogSource, SourceError};
use crate::storage::{CartRepository, KeyValueStore};

/// Result of a cart operation.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    /// The cart changed and was persisted.
    Applied,
    /// Nothing to do; the cart is unchanged and nothing was written.
    Unchanged,
    /// The operation was rejected; the cart is unchanged and the user was notified.
    Failed(CartError),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The rejection reason, if the operation failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CartError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Request to set a product's amount.
///
/// `amount` is signed because it usually comes straight from an input
/// control; zero and negative values are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Stock-aware shopping cart backed by a durable store.
pub struct CartStore<S, N> {
    cart: Cart,
    snapshots: Option<Snapshots>,
    storage: S,
    notifier: N,
    key: String,
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Open the store, restoring the cart persisted under `key`.
    ///
    /// A missing entry starts an empty cart. An unreadable or invalid entry
    /// is logged and also starts an empty cart; it is overwritten on the
    /// next successful mutation.
    pub fn open(storage: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match CartRepository::new(&storage, &key).load() {
            Ok(Some(cart)) => {
                debug!(key = %key, products = cart.len(), "Restored persisted cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable persisted cart");
                Cart::new()
            }
        };

        Self {
            cart,
            snapshots: None,
            storage,
            notifier,
            key,
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Installed snapshots, if any.
    #[must_use]
    pub const fn snapshots(&self) -> Option<&Snapshots> {
        self.snapshots.as_ref()
    }

    /// Whether catalog and stock snapshots are loaded.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.snapshots.is_some()
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Install already-fetched catalog and stock lists, replacing any
    /// previous snapshots.
    pub fn install_snapshots(&mut self, products: Vec<Product>, stock: Vec<StockInfo>) {
        info!(
            products = products.len(),
            stock = stock.len(),
            "Catalog and stock snapshots installed"
        );
        self.snapshots = Some(Snapshots::new(products, stock));
    }

    /// Fetch catalog and stock concurrently and install both.
    ///
    /// Calling this again refreshes the snapshots.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if either fetch fails. Previously installed
    /// snapshots (if any) are kept.
    #[instrument(skip(self, source))]
    pub async fn load_snapshots<C: CatalogSource>(&mut self, source: &C) -> Result<(), SourceError> {
        match tokio::try_join!(source.products(), source.stock()) {
            Ok((products, stock)) => {
                self.install_snapshots(products, stock);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load catalog and stock");
                Err(e)
            }
        }
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its amount incremented if stock
    /// allows; otherwise a new line with amount 1 is appended using the
    /// catalog's title, price and image.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn add_product(&mut self, product_id: ProductId) -> Outcome {
        let result = self.plan_add(product_id).map(Some);
        self.finish(Operation::Add, result)
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Outcome {
        let result = if self.cart.contains(product_id) {
            Ok(Some(self.cart.without(product_id)))
        } else {
            Ok(None)
        };
        self.finish(Operation::Remove, result)
    }

    /// Set a product's amount.
    ///
    /// Amounts of zero or less are ignored without notice. Amounts above
    /// stock are rejected. A product that is not in the cart is left alone.
    #[instrument(skip(self), fields(product_id = %request.product_id, amount = request.amount))]
    pub fn update_product_amount(&mut self, request: UpdateProductAmount) -> Outcome {
        if request.amount <= 0 {
            return Outcome::Unchanged;
        }
        let result = self.plan_update(request.product_id, request.amount);
        self.finish(Operation::UpdateAmount, result)
    }

    fn ready_snapshots(&self) -> Result<&Snapshots, CartError> {
        self.snapshots.as_ref().ok_or(CartError::NotReady)
    }

    fn plan_add(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let snapshots = self.ready_snapshots()?;

        if let Some(line) = self.cart.get(product_id) {
            let amount = snapshots.ensure_in_stock(product_id, u64::from(line.amount) + 1)?;
            return Ok(self.cart.with_amount(product_id, amount));
        }

        let amount = snapshots.ensure_in_stock(product_id, 1)?;
        let product = snapshots.product(product_id)?;
        Ok(self.cart.with_item(CartItem::from_product(product, amount)))
    }

    fn plan_update(&self, product_id: ProductId, amount: i64) -> Result<Option<Cart>, CartError> {
        let snapshots = self.ready_snapshots()?;
        let amount = snapshots.ensure_in_stock(product_id, amount.unsigned_abs())?;

        match self.cart.get(product_id) {
            Some(line) if line.amount != amount => {
                Ok(Some(self.cart.with_amount(product_id, amount)))
            }
            _ => Ok(None),
        }
    }

    /// Persist then swap in `next`, or report the failure.
    fn finish(&mut self, operation: Operation, result: Result<Option<Cart>, CartError>) -> Outcome {
        let next = match result {
            Ok(Some(next)) => next,
            Ok(None) => return Outcome::Unchanged,
            Err(e) => return self.reject(operation, e),
        };

        if let Err(e) = CartRepository::new(&self.storage, &self.key).save(&next) {
            return self.reject(operation, e.into());
        }

        self.cart = next;
        debug!(
            operation = operation.as_str(),
            products = self.cart.len(),
            quantity = self.cart.total_quantity(),
            "Cart updated"
        );
        Outcome::Applied
    }

    fn reject(&self, operation: Operation, e: CartError) -> Outcome {
        if e.is_stock_exceeded() {
            warn!(operation = operation.as_str(), error = %e, "Cart operation rejected");
        } else {
            error!(operation = operation.as_str(), error = %e, "Cart operation failed");
        }

        self.notifier
            .notify(Notification::error(operation.failure_message(&e)));
        Outcome::Failed(e)
    }
}
