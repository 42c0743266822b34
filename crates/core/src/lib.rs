//! Shopfront Core - storefront domain logic.
//!
//! This crate holds everything the storefront decides without talking to the
//! network:
//! - [`cart`] - In-memory cart with merge-on-add and derived totals
//! - [`catalog`] - Brand/category/price filtering and sort keys
//! - [`pagination`] - Page slicing and the visible page-number window
//! - [`detail`] - Add-to-cart gating and stock display for a product page
//! - [`checkout`] - Checkout form validation and order response handling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session access. The `storefront` and `cli` crates supply the
//! data and render the results.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod detail;
pub mod pagination;
pub mod types;

pub use cart::{Cart, CartItem, LineKey, NewCartItem};
pub use catalog::{CategoryFilter, FilterState, ParseSortKeyError, PriceRange, SortKey};
pub use checkout::{CheckoutForm, CheckoutOutcome, Field, ValidationErrors};
pub use detail::{AddToCartBlocked, ImageSize, StockStatus};
pub use pagination::Page;
pub use types::*;
