//! Catalog resolution: store slug to vendor plus grouped active products.
//!
//! The resolver is a pure read over a [`CatalogStore`]. It normalizes the
//! incoming slug once, requires exactly one matching vendor, re-checks that
//! every product row is active and belongs to that vendor, validates each
//! row, and groups the survivors for display.
//!
//! Successful resolutions can be cached in memory (`moka`). Misses and errors
//! are never cached, so a store that appears after a miss is visible on the
//! next request.

mod grouping;
mod metadata;

pub use grouping::{CategoryGroup, GroupedCatalog};
pub use metadata::StoreMetadata;

use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use whatsstore_core::{Product, ProductDraft, StoreSlug, Vendor, VendorId};

/// Failure reported by a [`CatalogStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached. Retrying may succeed.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),

    /// The store returned a record that fails validation.
    #[error("malformed catalog record: {0}")]
    Malformed(String),
}

/// Errors from [`CatalogResolver::resolve`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No single store matches the slug.
    #[error("store not found: {0}")]
    NotFound(String),

    /// The backing store was unreachable.
    #[error("catalog temporarily unavailable: {0}")]
    TransientFetch(String),

    /// The vendor record is unusable.
    #[error("invalid store record: {0}")]
    Validation(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::TransientFetch(msg),
            StoreError::Malformed(msg) => Self::Validation(msg),
        }
    }
}

/// Read access to vendors and their products.
pub trait CatalogStore: Send + Sync {
    /// Vendors whose slug equals `slug` exactly.
    ///
    /// Implementations return validated vendors and report records that fail
    /// validation as [`StoreError::Malformed`].
    fn vendors_by_slug(
        &self,
        slug: &StoreSlug,
    ) -> impl Future<Output = Result<Vec<Vendor>, StoreError>> + Send;

    /// Active product rows for a vendor, in display order.
    fn active_products(
        &self,
        vendor_id: VendorId,
    ) -> impl Future<Output = Result<Vec<ProductDraft>, StoreError>> + Send;
}

/// A resolved storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStore {
    pub vendor: Vendor,
    pub catalog: GroupedCatalog,
}

impl ResolvedStore {
    /// Social preview metadata for this store.
    #[must_use]
    pub fn metadata(&self) -> StoreMetadata {
        StoreMetadata::for_vendor(Some(&self.vendor))
    }
}

/// Resolves store slugs against a [`CatalogStore`].
pub struct CatalogResolver<S> {
    store: S,
    cache: Option<Cache<StoreSlug, ResolvedStore>>,
}

impl<S: CatalogStore> CatalogResolver<S> {
    /// Resolver without caching.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store, cache: None }
    }

    /// Cache successful resolutions for `ttl`, holding at most `capacity`
    /// stores.
    #[must_use]
    pub fn with_cache(mut self, ttl: Duration, capacity: u64) -> Self {
        self.cache = Some(
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        );
        self
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Resolve `slug` to its vendor and grouped active catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when the normalized slug is empty or does
    ///   not match exactly one vendor
    /// - [`CatalogError::TransientFetch`] when the store is unreachable
    /// - [`CatalogError::Validation`] when the vendor record is malformed
    #[instrument(skip(self))]
    pub async fn resolve(&self, slug: &str) -> Result<ResolvedStore, CatalogError> {
        let slug = StoreSlug::normalize(slug);
        if slug.is_empty() {
            return Err(CatalogError::NotFound(slug.into_inner()));
        }

        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&slug).await
        {
            debug!("Catalog cache hit");
            return Ok(hit);
        }

        let resolved = self.fetch(&slug).await?;

        if let Some(cache) = &self.cache {
            cache.insert(slug, resolved.clone()).await;
        }
        Ok(resolved)
    }

    /// Resolve `slug` from the store, skipping the cache and refreshing it.
    ///
    /// For writes that must not act on a stale catalog, such as adding a
    /// product to the cart. A store that no longer resolves is dropped from
    /// the cache.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogResolver::resolve`].
    #[instrument(skip(self))]
    pub async fn resolve_fresh(&self, slug: &str) -> Result<ResolvedStore, CatalogError> {
        let slug = StoreSlug::normalize(slug);
        if slug.is_empty() {
            return Err(CatalogError::NotFound(slug.into_inner()));
        }

        match self.fetch(&slug).await {
            Ok(resolved) => {
                if let Some(cache) = &self.cache {
                    cache.insert(slug, resolved.clone()).await;
                }
                Ok(resolved)
            }
            Err(e) => {
                if let (Some(cache), CatalogError::NotFound(_)) = (&self.cache, &e) {
                    cache.invalidate(&slug).await;
                }
                Err(e)
            }
        }
    }

    /// Drop a cached resolution so the next request reads the store.
    pub async fn invalidate(&self, slug: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&StoreSlug::normalize(slug)).await;
        }
    }

    async fn fetch(&self, slug: &StoreSlug) -> Result<ResolvedStore, CatalogError> {
        let mut vendors: Vec<Vendor> = self
            .store
            .vendors_by_slug(slug)
            .await?
            .into_iter()
            .filter(|v| &v.store_slug == slug)
            .collect();

        if vendors.len() > 1 {
            warn!(
                slug = %slug,
                matches = vendors.len(),
                "Store slug matches more than one vendor"
            );
            return Err(CatalogError::NotFound(slug.to_string()));
        }
        let Some(vendor) = vendors.pop() else {
            return Err(CatalogError::NotFound(slug.to_string()));
        };

        let drafts = self.store.active_products(vendor.id).await?;
        let products = visible_products(vendor.id, drafts);
        debug!(vendor_id = %vendor.id, products = products.len(), "Resolved store");

        Ok(ResolvedStore {
            catalog: GroupedCatalog::from_products(products),
            vendor,
        })
    }
}

/// Keep active rows owned by `vendor_id` that pass validation.
fn visible_products(vendor_id: VendorId, drafts: Vec<ProductDraft>) -> Vec<Product> {
    drafts
        .into_iter()
        .filter(|d| d.is_active && d.vendor_id == vendor_id)
        .filter_map(|draft| {
            let product_id = draft.id;
            match draft.validate() {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(%product_id, error = %e, "Skipping invalid product");
                    None
                }
            }
        })
        .collect()
}
