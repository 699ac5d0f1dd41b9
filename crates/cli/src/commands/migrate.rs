//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ws-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Storefront migrations live in `crates/storefront/migrations/`:
//!
//! ```text
//! migrations/
//! ├── 20260301000001_create_profiles.sql
//! └── 20260301000002_create_products.sql
//! ```
//!
//! The session table is owned by `tower-sessions-sqlx-store` and created by
//! its own migration after the schema migrations.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails.
pub async fn storefront() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Creating session table...");
    PostgresStore::new(pool).migrate().await?;

    info!("Storefront migrations complete!");
    Ok(())
}
