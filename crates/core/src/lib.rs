//! Quickcart Core - Shared types library.
//!
//! This crate provides common types used across all Quickcart components:
//! - `storefront` - Credential store, catalog, cart, wishlist and order tracking
//! - `cli` - The `quickcart` command-line shell
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, usernames, and the order status machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
