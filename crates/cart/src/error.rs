//! Cart operation errors and the messages shown for them.
//!
//! Errors never escape a cart operation. The store logs them, maps them to
//! a per-operation user message and hands them back inside
//! [`Outcome::Failed`](crate::Outcome::Failed).

use thiserror::Error;

use rocketshoes_core::ProductId;

use crate::storage::StorageError;

/// Message shown when adding a product fails.
pub const ADD_FAILED: &str = "Erro na adição do produto";
/// Message shown when removing a product fails.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Message shown when an amount change asks for more than is in stock.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Message shown when an amount change fails for any other reason.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Why a cart operation was rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity is above the stock snapshot.
    #[error("product {product_id}: requested {requested}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Product is missing from the catalog snapshot.
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// Product is missing from the stock snapshot.
    #[error("no stock information for product {0}")]
    StockNotFound(ProductId),

    /// Catalog and stock snapshots have not been loaded yet.
    #[error("catalog and stock are not loaded yet")]
    NotReady,

    /// Durable store could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Whether this is an expected validation failure rather than a fault.
    #[must_use]
    pub const fn is_stock_exceeded(&self) -> bool {
        matches!(self, Self::StockExceeded { .. })
    }
}

/// The three mutating cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// User-facing message for a failure of this operation.
    #[must_use]
    pub fn failure_message(self, error: &CartError) -> &'static str {
        match (self, error) {
            (Self::Add, _) => ADD_FAILED,
            (Self::Remove, _) => REMOVE_FAILED,
            (Self::UpdateAmount, CartError::StockExceeded { .. }) => OUT_OF_STOCK,
            (Self::UpdateAmount, _) => UPDATE_FAILED,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::UpdateAmount => "update_amount",
        }
    }
}
