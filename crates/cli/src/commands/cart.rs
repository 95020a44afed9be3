//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rs-cart show
//! rs-cart add 3
//! rs-cart update 3 2
//! rs-cart remove 3
//! ```

use rocketshoes_cart::{CartConfig, Outcome, UpdateProductAmount};
use rocketshoes_core::{Cart, ProductId};
use tracing::info;

use super::{CliError, open_ready_store, open_store};

/// Print the persisted cart.
pub fn show(config: &CartConfig) -> Result<(), CliError> {
    let store = open_store(config);
    print_cart(store.cart());
    Ok(())
}

/// Add one unit of `id`.
pub async fn add(config: &CartConfig, id: ProductId) -> Result<(), CliError> {
    let mut store = open_ready_store(config).await?;
    let outcome = store.add_product(id);
    report(outcome, store.cart())
}

/// Remove `id` from the cart.
pub fn remove(config: &CartConfig, id: ProductId) -> Result<(), CliError> {
    let mut store = open_store(config);
    let outcome = store.remove_product(id);
    report(outcome, store.cart())
}

/// Set the amount of `id`.
pub async fn update(config: &CartConfig, id: ProductId, amount: i64) -> Result<(), CliError> {
    let mut store = open_ready_store(config).await?;
    let outcome = store.update_product_amount(UpdateProductAmount {
        product_id: id,
        amount,
    });
    report(outcome, store.cart())
}

fn report(outcome: Outcome, cart: &Cart) -> Result<(), CliError> {
    match outcome {
        Outcome::Applied => {
            info!(products = cart.len(), "Cart saved");
            print_cart(cart);
            Ok(())
        }
        Outcome::Unchanged => {
            info!("Nothing to change");
            Ok(())
        }
        Outcome::Failed(e) => Err(CliError::Rejected(e)),
    }
}

fn print_cart(cart: &Cart) {
    #[allow(clippy::print_stdout)]
    {
        if cart.is_empty() {
            println!("Cart is empty");
            return;
        }

        println!("{:>4}  {:<40} {:>12} {:>6} {:>14}", "ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL");
        for item in cart {
            println!(
                "{:>4}  {:<40} {:>12} {:>6} {:>14}",
                item.id.as_i32(),
                truncate(&item.title, 40),
                item.price.format_brl(),
                item.amount,
                item.subtotal().format_brl()
            );
        }
        println!(
            "{} products, {} items, total {}",
            cart.len(),
            cart.total_quantity(),
            cart.total().format_brl()
        );
    }
}

/// Shorten to at most `max` characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
