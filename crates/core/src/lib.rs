//! CafeGo Core - Shared types library.
//!
//! This crate provides common types used across all CafeGo components:
//! - `storefront` - The coffee shop web application
//! - `cli` - Command-line tools for schema setup, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//! The optional `sqlite` feature adds sqlx encoding for ids and prices.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
