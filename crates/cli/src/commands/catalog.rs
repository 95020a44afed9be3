//! Catalog listing.

use rocketshoes_cart::CartConfig;

use super::cart::truncate;
use super::{CliError, open_ready_store};

/// Print every catalog product with its stock and current cart amount.
pub async fn list(config: &CartConfig) -> Result<(), CliError> {
    let store = open_ready_store(config).await?;
    let Some(snapshots) = store.snapshots() else {
        return Ok(());
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{:>4}  {:<40} {:>12} {:>6} {:>8}", "ID", "PRODUCT", "PRICE", "STOCK", "IN CART");
        for product in snapshots.products() {
            let stock = snapshots
                .available(product.id)
                .map_or_else(|_| "-".to_string(), |n| n.to_string());
            let in_cart = store.cart().get(product.id).map_or(0, |item| item.amount);
            println!(
                "{:>4}  {:<40} {:>12} {:>6} {:>8}",
                product.id.as_i32(),
                truncate(&product.title, 40),
                product.price.format_brl(),
                stock,
                in_cart
            );
        }
    }

    Ok(())
}
