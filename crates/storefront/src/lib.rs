//! Quickcart storefront library.
//!
//! Accounts and session flag over a key-value store, a remote product
//! catalog, cart, wishlist and order tracking. The `quickcart` binary in
//! `quickcart-cli` drives it; everything here is usable without it.
//!
//! # Layout
//!
//! - [`storage`]: key-value persistence (in-memory and JSON file)
//! - [`services::auth`]: sign-up, sign-in, sign-out
//! - [`catalog`]: product fetch and load state
//! - [`cart`], [`wishlist`], [`orders`]: the main page's collections
//! - [`router`]: which view to show
//! - [`state`]: all of the above composed into one app

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod prompt;
pub mod router;
pub mod services;
pub mod state;
pub mod storage;
pub mod wishlist;

pub use error::{Result, StorefrontError};
pub use state::{MainPage, Storefront};
