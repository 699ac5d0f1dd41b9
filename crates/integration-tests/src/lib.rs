//! Integration tests for WhatsStore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p whatsstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_engine` - Cart invariants and persistence across engines
//! - `catalog_resolver` - Store resolution against an in-memory catalog
//! - `checkout_message` - End-to-end shopper flow to a WhatsApp link
//!
//! The tests need no database: [`MemoryCatalog`] stands in for the
//! `PostgreSQL` catalog store.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use whatsstore_core::{ProductDraft, ProductId, StoreSlug, Vendor, VendorDraft, VendorId};
use whatsstore_storefront::catalog::{CatalogStore, StoreError};

/// In-memory [`CatalogStore`].
///
/// Vendor rows are held as drafts so tests can plant malformed records, and
/// product rows are returned in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    vendors: Mutex<Vec<VendorDraft>>,
    products: Mutex<Vec<ProductDraft>>,
    unavailable: AtomicBool,
    vendor_lookups: AtomicUsize,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vendor row and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn add_vendor(&self, business_name: &str, store_slug: &str, whatsapp: &str) -> VendorId {
        let id = VendorId::generate();
        self.vendors.lock().unwrap().push(VendorDraft {
            id,
            business_name: business_name.to_string(),
            store_slug: store_slug.to_string(),
            whatsapp_number: whatsapp.to_string(),
            avatar_url: None,
        });
        id
    }

    /// Add an active product row and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `price` is not a decimal or the fixture lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn add_product(
        &self,
        vendor_id: VendorId,
        name: &str,
        price: &str,
        category: Option<&str>,
    ) -> ProductId {
        let id = ProductId::generate();
        let mut products = self.products.lock().unwrap();
        let offset = i64::try_from(products.len()).unwrap();
        products.push(ProductDraft {
            id,
            vendor_id,
            name: name.to_string(),
            price: price.parse::<Decimal>().unwrap(),
            description: None,
            image_url: None,
            category: category.map(str::to_string),
            is_active: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(offset),
        });
        id
    }

    /// Flip a product's `is_active` flag.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn set_active(&self, id: ProductId, active: bool) {
        for product in self.products.lock().unwrap().iter_mut() {
            if product.id == id {
                product.is_active = active;
            }
        }
    }

    /// Make every lookup fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of vendor lookups served so far.
    #[must_use]
    pub fn vendor_lookups(&self) -> usize {
        self.vendor_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl CatalogStore for MemoryCatalog {
    async fn vendors_by_slug(&self, slug: &StoreSlug) -> Result<Vec<Vendor>, StoreError> {
        self.vendor_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let rows: Vec<VendorDraft> = self
            .vendors
            .lock()
            .map_err(|_| StoreError::Unavailable("fixture lock poisoned".to_string()))?
            .iter()
            .filter(|v| StoreSlug::normalize(&v.store_slug) == *slug)
            .cloned()
            .collect();

        rows.into_iter()
            .map(|draft| {
                draft
                    .validate()
                    .map_err(|e| StoreError::Malformed(e.to_string()))
            })
            .collect()
    }

    async fn active_products(&self, vendor_id: VendorId) -> Result<Vec<ProductDraft>, StoreError> {
        self.check_available()?;

        Ok(self
            .products
            .lock()
            .map_err(|_| StoreError::Unavailable("fixture lock poisoned".to_string()))?
            .iter()
            .filter(|p| p.vendor_id == vendor_id && p.is_active)
            .cloned()
            .collect())
    }
}
