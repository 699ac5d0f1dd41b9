//! Per-shopper request serialization.
//!
//! A cart request reads the session record, changes the cart, and the
//! session layer writes the record back once the handler has returned. Two
//! overlapping requests from one browser must not both start from the same
//! snapshot, so this layer sits outside the session layer and holds a lock
//! keyed by the session cookie for the whole request, write-back included.
//!
//! Requests without a session cookie are not serialized; each of them gets a
//! fresh session anyway.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;

/// Locks are dropped after this long without a request from the shopper.
const LOCK_IDLE: Duration = Duration::from_secs(10 * 60);

/// One async mutex per session cookie.
#[derive(Clone)]
pub struct CartLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl CartLocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder().time_to_idle(LOCK_IDLE).build(),
        }
    }

    /// Wait for exclusive access to the session identified by `key`.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(key.to_owned(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

impl Default for CartLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Run requests carrying the same session cookie one at a time.
pub async fn cart_lock_middleware(
    State(locks): State<CartLocks>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = match session_cookie(request.headers()) {
        Some(key) => Some(locks.lock(&key).await),
        None => None,
    };
    next.run(request).await
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}
