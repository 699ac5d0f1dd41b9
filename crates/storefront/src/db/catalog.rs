//! `PostgreSQL` catalog store over the `profiles` and `products` tables.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use whatsstore_core::{Product, ProductDraft, ProductId, StoreSlug, Vendor, VendorDraft, VendorId};

use super::RepositoryError;
use crate::catalog::{CatalogStore, StoreError};

#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    id: VendorId,
    business_name: String,
    store_slug: String,
    whatsapp_number: String,
    avatar_url: Option<String>,
}

impl From<VendorRow> for VendorDraft {
    fn from(row: VendorRow) -> Self {
        Self {
            id: row.id,
            business_name: row.business_name,
            store_slug: row.store_slug,
            whatsapp_number: row.whatsapp_number,
            avatar_url: row.avatar_url,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    vendor_id: VendorId,
    name: String,
    price: Decimal,
    description: Option<String>,
    image_url: Option<String>,
    category: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for ProductDraft {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            vendor_id: row.vendor_id,
            name: row.name,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
            category: row.category,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Catalog store backed by the storefront database.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or update a vendor profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another vendor already owns the
    /// slug, `RepositoryError::Database` for other failures.
    pub async fn upsert_vendor(&self, vendor: &Vendor) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, business_name, store_slug, whatsapp_number, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                business_name = EXCLUDED.business_name,
                store_slug = EXCLUDED.store_slug,
                whatsapp_number = EXCLUDED.whatsapp_number,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = now()
            ",
        )
        .bind(vendor.id)
        .bind(&vendor.business_name)
        .bind(vendor.store_slug.as_str())
        .bind(vendor.whatsapp_number.as_str())
        .bind(vendor.avatar_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;
        Ok(())
    }

    /// Insert or update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails (including an
    /// unknown vendor id).
    pub async fn upsert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO products
                (id, vendor_id, name, price, description, image_url, category, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                description = EXCLUDED.description,
                image_url = EXCLUDED.image_url,
                category = EXCLUDED.category,
                is_active = EXCLUDED.is_active
            ",
        )
        .bind(product.id)
        .bind(product.vendor_id)
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .bind(product.category.as_str())
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;
        Ok(())
    }
}

impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self), fields(slug = %slug))]
    async fn vendors_by_slug(&self, slug: &StoreSlug) -> Result<Vec<Vendor>, StoreError> {
        let rows: Vec<VendorRow> = sqlx::query_as(
            r"
            SELECT id, business_name, store_slug, whatsapp_number, avatar_url
            FROM profiles
            WHERE lower(store_slug) = $1
            ",
        )
        .bind(slug.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                VendorDraft::from(row)
                    .validate()
                    .map_err(|e| StoreError::Malformed(format!("vendor {id}: {e}")))
            })
            .collect()
    }

    #[instrument(skip(self), fields(vendor_id = %vendor_id))]
    async fn active_products(&self, vendor_id: VendorId) -> Result<Vec<ProductDraft>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, vendor_id, name, price, description, image_url, category,
                   is_active, created_at
            FROM products
            WHERE vendor_id = $1 AND is_active
            ORDER BY created_at, id
            ",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(ProductDraft::from).collect())
    }
}

/// Decode failures mean bad data; everything else is treated as an outage.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_) => StoreError::Malformed(err.to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeouts_are_unavailable() {
        assert!(matches!(
            store_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        assert!(matches!(
            store_error(sqlx::Error::ColumnNotFound("price".to_string())),
            StoreError::Malformed(_)
        ));
    }
}
