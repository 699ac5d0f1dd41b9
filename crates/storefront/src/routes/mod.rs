//! HTTP route handlers for storefront.
//!
//! All bodies are JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                            - Health check
//! GET    /health/ready                      - Readiness (database reachable)
//!
//! # Stores
//! GET    /stores/{slug}                     - Vendor, metadata, grouped catalog
//!
//! # Cart (held in the session)
//! GET    /cart                              - Cart view
//! POST   /cart/items                        - Add one unit {store_slug, product_id}
//! POST   /cart/items/{product_id}/increase  - Add one unit to a line
//! POST   /cart/items/{product_id}/decrease  - Remove one unit from a line
//! DELETE /cart/items/{product_id}           - Remove a line
//! DELETE /cart                              - Empty the cart
//!
//! # Checkout
//! POST   /stores/{slug}/checkout            - Message and WhatsApp link
//! GET    /stores/{slug}/checkout            - 303 redirect to the WhatsApp link
//! ```

pub mod cart;
pub mod checkout;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the main router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores/{slug}", get(stores::show))
        .route(
            "/stores/{slug}/checkout",
            get(checkout::redirect).post(checkout::create),
        )
        .route("/cart", get(cart::show).delete(cart::clear))
        .route("/cart/items", post(cart::add))
        .route("/cart/items/{product_id}", axum::routing::delete(cart::remove))
        .route("/cart/items/{product_id}/increase", post(cart::increase))
        .route("/cart/items/{product_id}/decrease", post(cart::decrease))
}
