//! Models shared by route handlers.

mod session;
mod views;

pub use session::keys as session_keys;
pub use views::{CartItemView, CartView, CheckoutView, StoreView};
