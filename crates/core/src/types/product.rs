//! Catalog and stock records as served by the product API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL, passed through untouched.
    pub image: String,
}

/// Maximum purchasable quantity for a product at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_api_payload() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(17990));
        assert!(product.image.ends_with("tenis1.jpg"));
    }

    #[test]
    fn test_stock_from_api_payload() {
        let stock: Vec<StockInfo> =
            serde_json::from_str(r#"[{"id":1,"amount":3},{"id":2,"amount":0}]"#).unwrap();
        assert_eq!(stock.len(), 2);
        assert_eq!(stock.last().unwrap().amount, 0);
    }

    #[test]
    fn test_stock_rejects_negative_amount() {
        assert!(serde_json::from_str::<StockInfo>(r#"{"id":1,"amount":-1}"#).is_err());
    }
}
