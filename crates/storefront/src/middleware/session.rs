//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session
//! carries the shopper's cart, which is only ever emptied by the shopper, so
//! the session record never expires on its own.

use sqlx::PgPool;
use tower_sessions::cookie::time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ws_session";

/// Expiry for cart sessions: the last representable date.
///
/// Browsers cap cookie lifetimes on their side; the stored record itself is
/// kept until the cart is cleared or the record is removed by hand.
#[must_use]
pub fn cart_session_expiry() -> Expiry {
    Expiry::AtDateTime(PrimitiveDateTime::new(Date::MAX, Time::MIDNIGHT).assume_utc())
}

/// Create the session layer with `PostgreSQL` store.
///
/// The store's table is created by `ws-cli migrate`.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(cart_session_expiry())
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
