//! WhatsStore Core - Shared domain types.
//!
//! This crate provides the types shared by every WhatsStore component:
//! - `storefront` - Catalog resolution, cart engine, checkout hand-off, HTTP service
//! - `cli` - Migrations, seeding, and a file-backed local cart
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Anything that holds one of these types has already
//! passed the boundary checks (non-negative prices, normalized slugs,
//! digits-only contact numbers).
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, slugs, phone numbers, and
//!   the vendor/product records built from them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
