//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! mh-cli cart show
//! mh-cli cart add 3 -q 2
//! mh-cli cart set 3 5
//! mh-cli cart remove 3
//! mh-cli cart clear
//! ```
//!
//! The cart lives in `STOREFRONT_CART_DIR/cart.json` and survives between
//! invocations.

use mountain_harvest_core::ProductId;
use mountain_harvest_storefront::cart::{
    CartStorage, CartStore, CartView, FileStorage, parse_quantity,
};
use mountain_harvest_storefront::error::Result;
use mountain_harvest_storefront::state::AppState;
use tracing::{info, warn};

/// Print every cart line followed by the totals.
pub fn show(state: &AppState) {
    let cart = state.open_cart();
    render(state, &cart.view());
}

/// Add a catalog product to the cart.
///
/// `quantity` is read the way the product page stepper reads it.
pub async fn add(state: &AppState, id: ProductId, quantity: &str) -> Result<()> {
    let mut cart = open_with_summary(state);
    state.add_to_cart(&mut cart, id, parse_quantity(quantity)).await
}

/// Remove a product from the cart.
pub fn remove(state: &AppState, id: ProductId) {
    let mut cart = open_with_summary(state);
    warn_if_absent(&cart, id);
    cart.remove_item(id);
}

/// Set a product's quantity; zero or less removes it.
pub fn set(state: &AppState, id: ProductId, quantity: i64) {
    let mut cart = open_with_summary(state);
    warn_if_absent(&cart, id);
    cart.set_quantity(id, quantity);
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    let mut cart = open_with_summary(state);
    cart.clear();
}

/// Open the cart with a subscriber that logs the badge after each change.
fn open_with_summary(state: &AppState) -> CartStore<FileStorage> {
    let mut cart = state.open_cart();
    let summary_state = state.clone();
    cart.subscribe(move |view| {
        info!(
            "Cart updated: {} item(s), total {}",
            view.item_count,
            summary_state.format_price(view.total)
        );
    });
    cart
}

fn warn_if_absent<S: CartStorage>(cart: &CartStore<S>, id: ProductId) {
    if cart.get(id).is_none() {
        warn!("Product {id} is not in the cart");
    }
}

fn render(state: &AppState, view: &CartView<'_>) {
    if view.lines.is_empty() {
        info!("Cart is empty");
        return;
    }

    for line in view.lines {
        info!(
            "#{:<4} {:<32} {:>4} x {:>14} = {:>14}",
            line.product_id().as_i32(),
            line.item.name,
            line.quantity,
            state.format_price(line.item.unit_price),
            state.format_price(line.line_total()),
        );
    }
    info!(
        "{} item(s), total {}",
        view.item_count,
        state.format_price(view.total)
    );
}
