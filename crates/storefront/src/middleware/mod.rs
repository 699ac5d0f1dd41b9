//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Cart lock (one request at a time per session cookie)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Handlers reach the session cart through the [`SessionCart`] extractor.

pub mod cart;
pub mod cart_lock;
pub mod request_id;
pub mod session;

pub use cart::SessionCart;
pub use cart_lock::{CartLocks, cart_lock_middleware};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
