//! Cart persistence.
//!
//! A [`CartStore`] keeps one [`CartSnapshot`] per namespace. The snapshot is
//! the whole cart, so concurrent writers against one namespace resolve as
//! last-write-wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cart, CartLineItem};

/// Namespace the storefront cart is persisted under.
pub const CART_NAMESPACE: &str = "whatsstore-cart";

/// Errors from a [`CartStore`].
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Reading or writing the backing file failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored snapshot could not be decoded.
    #[error("cart snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible version.
    #[error("unsupported cart snapshot version {0}")]
    UnsupportedVersion(u32),

    /// A namespace contains characters that cannot be used as a file name.
    #[error("invalid cart namespace: {0:?}")]
    InvalidNamespace(String),

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("cart store lock poisoned")]
    Poisoned,
}

/// Durable form of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub version: u32,
    pub cart: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Snapshot schema version written by this build.
    pub const VERSION: u32 = 1;

    /// Capture a cart.
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        Self {
            version: Self::VERSION,
            cart: cart.items().to_vec(),
        }
    }

    /// Restore the cart, re-establishing its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::UnsupportedVersion`] for snapshots from a
    /// different schema version.
    pub fn into_cart(self) -> Result<Cart, CartStoreError> {
        if self.version != Self::VERSION {
            return Err(CartStoreError::UnsupportedVersion(self.version));
        }
        Ok(Cart::from_items(self.cart))
    }
}

/// Load/save boundary for cart snapshots.
pub trait CartStore {
    /// Load the cart saved under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or decoded.
    fn load(&self, namespace: &str) -> Result<Option<Cart>, CartStoreError>;

    /// Replace the cart saved under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, namespace: &str, cart: &Cart) -> Result<(), CartStoreError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local cart store.
///
/// Clones share the same map, so two engines built from clones of one store
/// behave like two tabs of one browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    snapshots: Arc<Mutex<HashMap<String, CartSnapshot>>>,
}

impl MemoryCartStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `cart` under `namespace`.
    #[must_use]
    pub fn with_cart(namespace: &str, cart: &Cart) -> Self {
        let mut snapshots = HashMap::new();
        snapshots.insert(namespace.to_owned(), CartSnapshot::of(cart));
        Self {
            snapshots: Arc::new(Mutex::new(snapshots)),
        }
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self, namespace: &str) -> Result<Option<Cart>, CartStoreError> {
        let snapshots = self.snapshots.lock().map_err(|_| CartStoreError::Poisoned)?;
        snapshots
            .get(namespace)
            .cloned()
            .map(CartSnapshot::into_cart)
            .transpose()
    }

    fn save(&self, namespace: &str, cart: &Cart) -> Result<(), CartStoreError> {
        let mut snapshots = self.snapshots.lock().map_err(|_| CartStoreError::Poisoned)?;
        snapshots.insert(namespace.to_owned(), CartSnapshot::of(cart));
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Cart store writing one JSON file per namespace into a directory.
///
/// Writes go to a temporary file that is then renamed over the snapshot, so
/// a reader sees either the previous or the new cart, never a partial one.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Store snapshots in `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshots.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, namespace: &str) -> Result<PathBuf, CartStoreError> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CartStoreError::InvalidNamespace(namespace.to_owned()));
        }
        Ok(self.dir.join(format!("{namespace}.json")))
    }
}

impl CartStore for FileCartStore {
    fn load(&self, namespace: &str) -> Result<Option<Cart>, CartStoreError> {
        let path = self.path_for(namespace)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: CartSnapshot = serde_json::from_slice(&bytes)?;
        snapshot.into_cart().map(Some)
    }

    fn save(&self, namespace: &str, cart: &Cart) -> Result<(), CartStoreError> {
        let path = self.path_for(namespace)?;
        std::fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec_pretty(&CartSnapshot::of(cart))?;
        let tmp = self.dir.join(format!(".{namespace}.json.tmp"));
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
