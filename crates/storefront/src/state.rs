//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::CatalogResolver;
use crate::checkout::CheckoutFormatter;
use crate::config::StorefrontConfig;
use crate::db::PgCatalogStore;
use crate::middleware::CartLocks;

/// Most stores held in the catalog cache at once.
const CATALOG_CACHE_CAPACITY: u64 = 1_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: CatalogResolver<PgCatalogStore>,
    checkout: CheckoutFormatter,
    cart_locks: CartLocks,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let mut catalog = CatalogResolver::new(PgCatalogStore::new(pool.clone()));
        if let Some(ttl) = config.catalog_cache_ttl {
            catalog = catalog.with_cache(ttl, CATALOG_CACHE_CAPACITY);
        }
        let checkout = CheckoutFormatter::new(config.currency);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                checkout,
                cart_locks: CartLocks::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the catalog resolver.
    #[must_use]
    pub fn catalog(&self) -> &CatalogResolver<PgCatalogStore> {
        &self.inner.catalog
    }

    /// Get the checkout formatter.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutFormatter {
        &self.inner.checkout
    }

    /// Get the per-session cart request locks.
    #[must_use]
    pub fn cart_locks(&self) -> &CartLocks {
        &self.inner.cart_locks
    }
}
