//! Cart route handlers.
//!
//! Every handler loads the session cart, applies at most one engine
//! operation, writes the cart back, and returns the resulting [`CartView`].
//! Operations on a product that is not in the cart are no-ops.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use whatsstore_core::ProductId;

use crate::cart::Cart;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::SessionCart;
use crate::models::CartView;
use crate::state::AppState;

/// Body of `POST /cart/items`.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub store_slug: String,
    pub product_id: ProductId,
}

fn view(state: &AppState, cart: &Cart) -> Json<CartView> {
    Json(CartView::new(cart, state.checkout().currency()))
}

/// Show the cart.
pub async fn show(State(state): State<AppState>, cart: SessionCart) -> Json<CartView> {
    view(&state, cart.cart())
}

/// Add one unit of a product from a store's active catalog.
///
/// The catalog is read from the store, not the cache, so a product that was
/// just deactivated cannot be added.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let resolved = state.catalog().resolve_fresh(&body.store_slug).await?;
    let product = resolved
        .catalog
        .product(body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", product_id.as_str())]));
    cart.engine().add_to_cart(product);
    let cart = cart.commit().await;
    Ok(view(&state, &cart))
}

/// Add one unit to an existing line.
pub async fn increase(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Path(product_id): Path<ProductId>,
) -> Json<CartView> {
    cart.engine().increase_quantity(product_id);
    view(&state, &cart.commit().await)
}

/// Remove one unit from a line, dropping it at zero.
pub async fn decrease(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Path(product_id): Path<ProductId>,
) -> Json<CartView> {
    cart.engine().decrease_quantity(product_id);
    view(&state, &cart.commit().await)
}

/// Remove a line.
pub async fn remove(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Path(product_id): Path<ProductId>,
) -> Json<CartView> {
    cart.engine().remove_from_cart(product_id);
    view(&state, &cart.commit().await)
}

/// Empty the cart.
pub async fn clear(State(state): State<AppState>, mut cart: SessionCart) -> Json<CartView> {
    cart.engine().clear_cart();
    view(&state, &cart.commit().await)
}
