//! Session-related types.
//!
//! The shopper's cart is held in the session as a versioned
//! [`CartSnapshot`](crate::cart::CartSnapshot).

/// Session keys.
pub mod keys {
    /// Key for the shopper's cart snapshot.
    pub const CART: &str = "cart";
}
