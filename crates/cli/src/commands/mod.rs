//! CLI subcommands.

pub mod checkout;
pub mod product;
pub mod products;

use shopfront_core::checkout::CHECKOUT_FAILED_MESSAGE;
use shopfront_storefront::catalog::CatalogError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog or order API call failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An argument was present but unusable.
    #[error("Invalid argument {0}: {1}")]
    InvalidArgument(&'static str, String),

    /// The checkout form did not pass validation.
    #[error("{0} checkout field(s) invalid")]
    Invalid(usize),

    /// The order API answered but did not accept the order.
    #[error("{}", CHECKOUT_FAILED_MESSAGE)]
    Rejected,
}
