//! Domain models for the storefront.
//!
//! These types represent records read from the database, separate from the
//! view types handlers build for templates.

pub mod cart;
pub mod product;
pub mod session;
pub mod transaction;
pub mod user;

pub use cart::CartLine;
pub use product::Product;
pub use session::keys as session_keys;
pub use transaction::{LineItem, Transaction};
pub use user::User;
