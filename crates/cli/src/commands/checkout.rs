//! `shopfront checkout`: validate a checkout form locally, then submit it.

use clap::Args;
use shopfront_core::{CheckoutForm, CheckoutOutcome};
use shopfront_storefront::catalog::CatalogClient;

use super::CommandError;

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// First name
    #[arg(long)]
    name: String,

    /// Last name
    #[arg(long)]
    surname: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// US zip code (12345 or 12345-6789)
    #[arg(long)]
    zip: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            surname: args.surname,
            phone_number: args.phone,
            email: args.email,
            zip_code: args.zip,
        }
    }
}

pub async fn run(client: &CatalogClient, args: CheckoutArgs) -> Result<(), CommandError> {
    let form = CheckoutForm::from(args);

    let errors = form.validate();
    if !errors.is_empty() {
        for (field, message) in errors.iter() {
            println!("{field}: {message}");
        }
        return Err(CommandError::Invalid(errors.len()));
    }

    match client.submit_checkout(&form.trimmed()).await? {
        CheckoutOutcome::Accepted => {
            println!("Order placed successfully.");
            Ok(())
        }
        CheckoutOutcome::Rejected { body } => {
            tracing::debug!(%body, "Order API rejected checkout");
            Err(CommandError::Rejected)
        }
    }
}
