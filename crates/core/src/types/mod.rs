//! Core types for Shopfront.
//!
//! Type-safe wrappers for ids, prices and emails, plus the catalog records
//! the API returns.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod wire;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{Brand, Category, OptionGroup, Product};
