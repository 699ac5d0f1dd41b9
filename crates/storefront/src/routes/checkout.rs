//! Checkout handlers.
//!
//! Checkout renders the store's share of the session cart into a WhatsApp
//! message. The cart is left untouched so the shopper can come back and
//! adjust the order after chatting with the vendor.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tracing::{info, instrument};

use crate::cart::Cart;
use crate::catalog::{CatalogResolver, CatalogStore};
use crate::checkout::{Checkout, CheckoutFormatter};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::SessionCart;
use crate::models::CheckoutView;
use crate::state::AppState;

/// Render `cart` for the store at `slug`, refusing an order with no lines
/// from that store.
async fn prepare<S: CatalogStore>(
    catalog: &CatalogResolver<S>,
    formatter: &CheckoutFormatter,
    slug: &str,
    cart: &Cart,
) -> Result<Checkout> {
    let resolved = catalog.resolve(slug).await?;
    let checkout = formatter.format_checkout(cart, &resolved.vendor);

    if checkout.is_empty() {
        return Err(AppError::BadRequest(
            "cart has no items from this store".to_string(),
        ));
    }

    info!(
        vendor_id = %resolved.vendor.id,
        items = checkout.included_items,
        excluded = checkout.excluded_items,
        "Checkout prepared"
    );
    add_breadcrumb("checkout", "Prepared WhatsApp order", Some(&[("store", slug)]));
    Ok(checkout)
}

/// Return the order message and WhatsApp link.
#[instrument(skip(state, cart))]
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    cart: SessionCart,
) -> Result<Json<CheckoutView>> {
    let checkout = prepare(state.catalog(), state.checkout(), &slug, cart.cart()).await?;
    Ok(Json(CheckoutView::new(
        checkout,
        state.checkout().currency(),
    )))
}

/// Redirect straight to the WhatsApp chat (303 See Other).
#[instrument(skip(state, cart))]
pub async fn redirect(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    cart: SessionCart,
) -> Result<Redirect> {
    let checkout = prepare(state.catalog(), state.checkout(), &slug, cart.cart()).await?;
    Ok(Redirect::to(&checkout.deep_link))
}
