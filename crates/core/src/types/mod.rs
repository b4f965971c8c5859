//! Core types for CafeGo.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod username;

pub use id::*;
pub use price::Price;
pub use quantity::Quantity;
pub use username::{Username, UsernameError};
