//! The cart and its immutable transitions.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, unique by product id, each
//! with `amount >= 1`. Transitions (`with_item`, `with_amount`, `without`)
//! never touch `self`; they hand back a fresh cart so a failed validation or
//! a failed write can simply drop the candidate.
//!
//! Stock limits are not known here. The cart store checks them before asking
//! for a transition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// Errors found when rebuilding a cart from untrusted items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartIntegrityError {
    /// An item has an amount of zero.
    #[error("product {0} has an amount of zero")]
    ZeroAmount(ProductId),
    /// The same product appears more than once.
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
}

/// A product with the quantity selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Build a cart line from a catalog entry.
    #[must_use]
    pub fn from_product(product: &Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount,
        }
    }

    /// `price * amount`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.amount)
    }
}

/// The user's cart.
///
/// Serializes as a plain JSON array of items, which is also the persisted
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from items of unknown provenance.
    ///
    /// # Errors
    ///
    /// Returns an error if any item has a zero amount or if a product id is
    /// repeated.
    pub fn try_from_items(items: Vec<CartItem>) -> Result<Self, CartIntegrityError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount == 0 {
                return Err(CartIntegrityError::ZeroAmount(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CartIntegrityError::DuplicateProduct(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Check the invariants of an already-built cart.
    ///
    /// # Errors
    ///
    /// See [`Cart::try_from_items`].
    pub fn validate(self) -> Result<Self, CartIntegrityError> {
        Self::try_from_items(self.items)
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// A new cart with `item` appended.
    ///
    /// If the product is already present its line is replaced in place
    /// instead, so the result stays unique by id.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Self {
        if self.contains(item.id) {
            let id = item.id;
            let mut replacement = Some(item);
            let items = self
                .items
                .iter()
                .map(|existing| {
                    if existing.id == id {
                        replacement.take().unwrap_or_else(|| existing.clone())
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            return Self { items };
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Self { items }
    }

    /// A new cart with the product's amount set to `amount`.
    ///
    /// Other lines are unchanged. A product that is not in the cart yields an
    /// identical cart.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// A new cart without the product.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shoe(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            price: Price::from_cents(cents),
            image: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    fn cart_of(lines: &[(i32, u32)]) -> Cart {
        lines.iter().fold(Cart::new(), |cart, &(id, amount)| {
            cart.with_item(CartItem::from_product(&shoe(id, 1000), amount))
        })
    }

    #[test]
    fn test_with_item_appends_in_order() {
        let cart = cart_of(&[(1, 1), (2, 1), (3, 1)]);
        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_with_item_leaves_original_untouched() {
        let cart = cart_of(&[(1, 1)]);
        let next = cart.with_item(CartItem::from_product(&shoe(2, 500), 1));
        assert_eq!(cart.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_with_item_replaces_existing_line() {
        let cart = cart_of(&[(1, 1), (2, 1)]);
        let next = cart.with_item(CartItem::from_product(&shoe(1, 1000), 4));
        assert_eq!(next.len(), 2);
        assert_eq!(next.get(ProductId::new(1)).unwrap().amount, 4);
        assert_eq!(next.items().first().unwrap().id, ProductId::new(1));
    }

    #[test]
    fn test_with_amount_only_touches_target() {
        let cart = cart_of(&[(1, 1), (2, 2)]);
        let next = cart.with_amount(ProductId::new(2), 5);
        assert_eq!(next.get(ProductId::new(1)), cart.get(ProductId::new(1)));
        assert_eq!(next.get(ProductId::new(2)).unwrap().amount, 5);
    }

    #[test]
    fn test_with_amount_missing_product_is_identity() {
        let cart = cart_of(&[(1, 1)]);
        assert_eq!(cart.with_amount(ProductId::new(9), 3), cart);
    }

    #[test]
    fn test_without_is_idempotent() {
        let cart = cart_of(&[(1, 1), (2, 2)]);
        let once = cart.without(ProductId::new(1));
        let twice = once.without(ProductId::new(1));
        assert_eq!(once, twice);
        assert!(!once.contains(ProductId::new(1)));
        assert_eq!(cart.without(ProductId::new(7)), cart);
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_item(CartItem::from_product(&shoe(1, 17990), 2))
            .with_item(CartItem::from_product(&shoe(2, 13990), 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(
            cart.get(ProductId::new(1)).unwrap().subtotal(),
            Price::from_cents(35980)
        );
        assert_eq!(cart.total(), Price::from_cents(49970));
    }

    #[test]
    fn test_try_from_items_rejects_zero_amount() {
        let items = vec![CartItem::from_product(&shoe(1, 100), 0)];
        assert_eq!(
            Cart::try_from_items(items),
            Err(CartIntegrityError::ZeroAmount(ProductId::new(1)))
        );
    }

    #[test]
    fn test_try_from_items_rejects_duplicates() {
        let items = vec![
            CartItem::from_product(&shoe(1, 100), 1),
            CartItem::from_product(&shoe(1, 100), 2),
        ];
        assert_eq!(
            Cart::try_from_items(items),
            Err(CartIntegrityError::DuplicateProduct(ProductId::new(1)))
        );
    }

    #[test]
    fn test_json_shape_is_a_plain_array() {
        let cart = Cart::new().with_item(CartItem {
            id: ProductId::new(1),
            title: "Shoe".to_string(),
            price: Price::from_cents(1000),
            image: "x".to_string(),
            amount: 1,
        });

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        let expected = serde_json::json!([
            {"id": 1, "title": "Shoe", "price": 10.0, "image": "x", "amount": 1}
        ]);
        assert_eq!(json, expected);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
