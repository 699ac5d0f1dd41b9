//! Shopping cart state and the engine that persists it.
//!
//! # Invariants
//!
//! - At most one line item per product id
//! - Every line item has `quantity >= 1`; an item whose quantity would drop
//!   to zero is removed
//! - Line items keep first-added-first order
//!
//! [`Cart`] is the pure state with its mutation rules. [`CartEngine`] owns a
//! `Cart` plus a [`CartStore`] and writes a snapshot after every mutation.

mod engine;
mod store;

pub use engine::CartEngine;
pub use store::{
    CART_NAMESPACE, CartSnapshot, CartStore, CartStoreError, FileCartStore, MemoryCartStore,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use whatsstore_core::{Product, ProductId, VendorId};

/// A product plus how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    /// Product id of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// An ordered set of line items, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary line items, restoring the invariants.
    ///
    /// Rows with quantity zero are dropped and rows sharing a product id are
    /// merged into the first occurrence with their quantities summed.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.position(item.id()) {
                Some(idx) => {
                    if let Some(existing) = cart.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Line items in cart order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Exact sum of `price * quantity` over every line item.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(CartLineItem::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Line items belonging to one vendor, in cart order.
    pub fn items_for_vendor(&self, vendor_id: VendorId) -> impl Iterator<Item = &CartLineItem> {
        self.items
            .iter()
            .filter(move |item| item.product.vendor_id == vendor_id)
    }

    /// Add one unit of `product`, merging with an existing line if present.
    pub fn add(&mut self, product: Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartLineItem {
                product,
                quantity: 1,
            }),
        }
    }

    /// Add one unit to an existing line. Returns `false` if absent.
    pub fn increase(&mut self, id: ProductId) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Remove one unit from a line, dropping the line at zero.
    /// Returns `false` if absent.
    pub fn decrease(&mut self, id: ProductId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let remove = match self.items.get_mut(idx) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                false
            }
            _ => true,
        };
        if remove {
            self.items.remove(idx);
        }
        true
    }

    /// Remove a line regardless of quantity. Returns `false` if absent.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
