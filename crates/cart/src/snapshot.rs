//! Point-in-time catalog and stock data.

use std::collections::HashMap;

use rocketshoes_core::{Product, ProductId, StockInfo};

use crate::error::CartError;

/// Catalog and stock as fetched at startup, indexed by product id.
///
/// Later duplicates of an id replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    catalog: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
}

impl Snapshots {
    #[must_use]
    pub fn new(products: Vec<Product>, stock: Vec<StockInfo>) -> Self {
        Self {
            catalog: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: stock.into_iter().map(|s| (s.id, s.amount)).collect(),
        }
    }

    /// Catalog entry for `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the catalog has no such product.
    pub fn product(&self, id: ProductId) -> Result<&Product, CartError> {
        self.catalog.get(&id).ok_or(CartError::ProductNotFound(id))
    }

    /// Maximum purchasable quantity for `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockNotFound` if the stock list has no such product.
    pub fn available(&self, id: ProductId) -> Result<u32, CartError> {
        self.stock
            .get(&id)
            .copied()
            .ok_or(CartError::StockNotFound(id))
    }

    /// Check that `requested` units of `id` are in stock, returning the
    /// amount as a cart quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockExceeded` if `requested` is above the limit,
    /// or `CartError::StockNotFound` if there is no limit on record.
    pub fn ensure_in_stock(&self, id: ProductId, requested: u64) -> Result<u32, CartError> {
        let available = self.available(id)?;
        u32::try_from(requested)
            .ok()
            .filter(|amount| *amount <= available)
            .ok_or(CartError::StockExceeded {
                product_id: id,
                requested,
                available,
            })
    }

    /// Catalog entries sorted by id.
    #[must_use]
    pub fn products(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.catalog.values().collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::Price;

    use super::*;

    fn snapshots() -> Snapshots {
        Snapshots::new(
            vec![Product {
                id: ProductId::new(1),
                title: "Shoe".to_string(),
                price: Price::from_cents(1000),
                image: "x".to_string(),
            }],
            vec![
                StockInfo {
                    id: ProductId::new(1),
                    amount: 2,
                },
                StockInfo {
                    id: ProductId::new(1),
                    amount: 5,
                },
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let s = snapshots();
        assert_eq!(s.product(ProductId::new(1)).unwrap().title, "Shoe");
        assert!(matches!(
            s.product(ProductId::new(2)),
            Err(CartError::ProductNotFound(_))
        ));
        assert!(matches!(
            s.available(ProductId::new(2)),
            Err(CartError::StockNotFound(_))
        ));
    }

    #[test]
    fn test_later_duplicates_win() {
        assert_eq!(snapshots().available(ProductId::new(1)).unwrap(), 5);
    }

    #[test]
    fn test_ensure_in_stock_boundary() {
        let s = snapshots();
        assert_eq!(s.ensure_in_stock(ProductId::new(1), 5).unwrap(), 5);
        assert!(matches!(
            s.ensure_in_stock(ProductId::new(1), 6),
            Err(CartError::StockExceeded {
                requested: 6,
                available: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_request_beyond_u32_keeps_its_value() {
        let s = Snapshots::new(
            vec![],
            vec![StockInfo {
                id: ProductId::new(1),
                amount: u32::MAX,
            }],
        );
        let requested = u64::from(u32::MAX) + 1;
        assert!(matches!(
            s.ensure_in_stock(ProductId::new(1), requested),
            Err(CartError::StockExceeded {
                requested: r,
                available: u32::MAX,
                ..
            }) if r == requested
        ));
    }
}
