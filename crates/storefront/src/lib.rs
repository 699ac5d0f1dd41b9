//! WhatsStore storefront library.
//!
//! The shopper-facing half of WhatsStore: slug-addressed vendor catalogs, a
//! persisted shopping cart, and checkout by WhatsApp message. The `storefront`
//! binary serves these over HTTP; `ws-cli` drives the same modules from a
//! terminal.
//!
//! - [`catalog`] resolves a store slug to its vendor and grouped catalog
//! - [`cart`] holds the cart and persists it through a [`cart::CartStore`]
//! - [`checkout`] turns a cart into a WhatsApp message and `wa.me` link

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
