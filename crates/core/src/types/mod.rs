//! Core types for WhatsStore.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod category;
pub mod id;
pub mod phone;
pub mod price;
pub mod product;
pub mod slug;
pub mod vendor;

pub use category::Category;
pub use id::*;
pub use phone::{PhoneError, WhatsAppNumber};
pub use price::{CurrencyCode, Price, PriceError, format_amount};
pub use product::{Product, ProductDraft, ValidationError};
pub use slug::{SlugError, StoreSlug};
pub use vendor::{Vendor, VendorDraft};
