//! Cart engine: cart state bound to a persistence namespace.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use whatsstore_core::{Product, ProductId};

use super::store::{CART_NAMESPACE, CartStore};
use super::Cart;

/// Owns the shopper's cart and persists it after every change.
///
/// Operations never fail. The in-memory cart is authoritative for this
/// context; a failed save is logged and the next successful save writes the
/// full cart again.
///
/// ```
/// use whatsstore_storefront::cart::{CartEngine, MemoryCartStore};
///
/// let store = MemoryCartStore::new();
/// let engine = CartEngine::open(store);
/// assert!(engine.cart().is_empty());
/// ```
#[derive(Debug)]
pub struct CartEngine<S: CartStore> {
    store: S,
    namespace: String,
    cart: Cart,
}

impl<S: CartStore> CartEngine<S> {
    /// Open the engine on the default [`CART_NAMESPACE`].
    #[must_use]
    pub fn open(store: S) -> Self {
        Self::open_in(store, CART_NAMESPACE)
    }

    /// Open the engine on a specific namespace, loading any saved cart.
    ///
    /// An unreadable snapshot starts the engine with an empty cart.
    #[must_use]
    pub fn open_in(store: S, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let cart = load_or_empty(&store, &namespace);
        Self {
            store,
            namespace,
            cart,
        }
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Namespace this engine persists under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Consume the engine and return the cart.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Add one unit of `product`; repeated adds raise the quantity.
    pub fn add_to_cart(&mut self, product: Product) {
        debug!(product_id = %product.id, "add to cart");
        self.cart.add(product);
        self.persist();
    }

    /// Add one unit to an existing line. No-op if absent.
    pub fn increase_quantity(&mut self, id: ProductId) {
        if self.cart.increase(id) {
            self.persist();
        }
    }

    /// Remove one unit from a line, dropping it at zero. No-op if absent.
    pub fn decrease_quantity(&mut self, id: ProductId) {
        if self.cart.decrease(id) {
            self.persist();
        }
    }

    /// Remove a line regardless of its quantity. No-op if absent.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        if self.cart.remove(id) {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Exact sum of `price * quantity`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Replace the in-memory cart with whatever is currently persisted.
    ///
    /// Use when another context may have written the same namespace.
    pub fn reload(&mut self) {
        self.cart = load_or_empty(&self.store, &self.namespace);
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.namespace, &self.cart) {
            warn!(
                namespace = %self.namespace,
                error = %e,
                "Failed to persist cart snapshot"
            );
        }
    }
}

fn load_or_empty<S: CartStore>(store: &S, namespace: &str) -> Cart {
    match store.load(namespace) {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(%namespace, error = %e, "Discarding unreadable cart snapshot");
            Cart::new()
        }
    }
}
