//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account creation, sign-in and the session flag

pub mod auth;
