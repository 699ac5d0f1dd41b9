//! CLI command implementations.

pub mod cart;
pub mod migrate;
pub mod seed;
pub mod store;

use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use whatsstore_core::CurrencyCode;
use whatsstore_storefront::catalog::CatalogResolver;
use whatsstore_storefront::db::{self, PgCatalogStore};

/// Storefront database URL, with fallback to generic `DATABASE_URL`.
fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_DATABASE_URL not set".into())
}

/// Connect to the storefront database.
async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = db::create_pool(&database_url()?).await?;
    info!("Connected to database");
    Ok(pool)
}

/// Catalog resolver over the storefront database.
async fn resolver() -> Result<CatalogResolver<PgCatalogStore>, Box<dyn std::error::Error>> {
    Ok(CatalogResolver::new(PgCatalogStore::new(connect().await?)))
}

/// Currency used for display, from `STOREFRONT_CURRENCY` (default NGN).
fn currency() -> Result<CurrencyCode, Box<dyn std::error::Error>> {
    match std::env::var("STOREFRONT_CURRENCY") {
        Ok(code) => Ok(code.parse::<CurrencyCode>()?),
        Err(_) => Ok(CurrencyCode::default()),
    }
}
