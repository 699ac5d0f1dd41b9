//! JSON response bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use whatsstore_core::{CurrencyCode, ProductId, Vendor, VendorId};

use crate::cart::{Cart, CartLineItem};
use crate::catalog::{GroupedCatalog, ResolvedStore, StoreMetadata};
use crate::checkout::Checkout;

/// One cart line as shown to the shopper.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
}

impl CartItemView {
    fn new(item: &CartLineItem, currency: CurrencyCode) -> Self {
        Self {
            product_id: item.product.id,
            vendor_id: item.product.vendor_id,
            name: item.product.name.clone(),
            image_url: item.product.image_url.clone(),
            quantity: item.quantity,
            price: currency.display(item.product.price.amount()),
            subtotal: currency.display(item.subtotal()),
        }
    }
}

/// The cart drawer.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub total: Decimal,
    pub total_display: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let total = cart.total_price();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            item_count: cart.item_count(),
            total,
            total_display: currency.display(total),
        }
    }
}

/// A storefront page.
#[derive(Debug, Clone, Serialize)]
pub struct StoreView {
    pub vendor: Vendor,
    pub metadata: StoreMetadata,
    pub store_url: String,
    pub catalog: GroupedCatalog,
}

impl StoreView {
    #[must_use]
    pub fn new(resolved: ResolvedStore, store_url: String) -> Self {
        Self {
            metadata: resolved.metadata(),
            vendor: resolved.vendor,
            store_url,
            catalog: resolved.catalog,
        }
    }
}

/// Result of a checkout request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub message: String,
    pub deep_link: String,
    pub total_display: String,
    pub excluded_items: usize,
}

impl CheckoutView {
    #[must_use]
    pub fn new(checkout: Checkout, currency: CurrencyCode) -> Self {
        Self {
            total_display: currency.display(checkout.total),
            message: checkout.message,
            deep_link: checkout.deep_link,
            excluded_items: checkout.excluded_items,
        }
    }
}
