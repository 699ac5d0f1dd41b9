//! Session-held cart extractor.
//!
//! The shopper's cart lives in the tower-sessions session as a
//! [`CartSnapshot`]. [`SessionCart`] loads it into a [`CartEngine`] backed by
//! a [`MemoryCartStore`]; handlers mutate through the engine and call
//! [`SessionCart::commit`] to write the result back to the session.
//!
//! The engine's per-mutation persistence only reaches that request-local
//! store. The durable write is `commit`, which puts the snapshot into the
//! session, and the session layer saves the record after the handler
//! returns. [`super::cart_lock`] keeps overlapping requests from one shopper
//! from interleaving between load and save.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use tracing::warn;

use crate::cart::{CART_NAMESPACE, Cart, CartEngine, CartSnapshot, MemoryCartStore};
use crate::error::AppError;
use crate::models::session_keys;

/// The current shopper's cart, loaded from the session.
pub struct SessionCart {
    session: Session,
    engine: CartEngine<MemoryCartStore>,
}

impl SessionCart {
    /// Load the cart held in `session`.
    ///
    /// A snapshot that cannot be decoded, or was written by another schema
    /// version, is discarded and the shopper starts with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self, AppError> {
        let cart = match session.get::<CartSnapshot>(session_keys::CART).await {
            Ok(Some(snapshot)) => snapshot.into_cart().unwrap_or_else(|e| {
                warn!(error = %e, "Discarding session cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                warn!(error = %e, "Discarding undecodable session cart");
                Cart::new()
            }
            Err(e) => return Err(e.into()),
        };

        let store = MemoryCartStore::with_cart(CART_NAMESPACE, &cart);
        Ok(Self {
            session,
            engine: CartEngine::open(store),
        })
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.engine.cart()
    }

    /// Engine for mutating the cart.
    pub const fn engine(&mut self) -> &mut CartEngine<MemoryCartStore> {
        &mut self.engine
    }

    /// Write the cart back to the session and return it.
    ///
    /// A failed write is logged; the returned cart still reflects the change.
    pub async fn commit(self) -> Cart {
        let cart = self.engine.into_cart();
        if let Err(e) = self
            .session
            .insert(session_keys::CART, CartSnapshot::of(&cart))
            .await
        {
            warn!(error = %e, "Failed to persist session cart");
        }
        cart
    }
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        Self::load(session).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::cart::tests::product;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_empty_session_is_empty_cart() {
        let cart = SessionCart::load(session()).await.unwrap();
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_commit_round_trips_through_session() {
        let session = session();
        let rice = product("Rice", "1500");

        let mut cart = SessionCart::load(session.clone()).await.unwrap();
        cart.engine().add_to_cart(rice.clone());
        cart.engine().add_to_cart(rice.clone());
        cart.commit().await;

        let reloaded = SessionCart::load(session).await.unwrap();
        assert_eq!(reloaded.cart().get(rice.id).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_foreign_version_is_discarded() {
        let session = session();
        session
            .insert(
                session_keys::CART,
                CartSnapshot {
                    version: 7,
                    cart: Vec::new(),
                },
            )
            .await
            .unwrap();

        let cart = SessionCart::load(session).await.unwrap();
        assert!(cart.cart().is_empty());
    }
}
