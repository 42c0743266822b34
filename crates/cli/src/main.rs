//! Shopfront CLI - browse the catalog and place orders from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of products, cheapest first
//! shopfront products --sort price_asc
//!
//! # Nike and Adidas shoes under $150, page 2
//! shopfront products --brand Nike --brand Adidas --category Shoes --max-price 150 --page 2
//!
//! # One product with stock and options
//! shopfront product 12
//!
//! # Validate and submit an order
//! shopfront checkout --name Ada --surname Lovelace --phone "+1 555 123 4567" \
//!     --email ada@example.com --zip 12345
//! ```
//!
//! # Commands
//!
//! - `products` - Filter, sort and page the catalog
//! - `product` - Show one product
//! - `checkout` - Validate a checkout form and submit it

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command results are the program's output.
#![allow(clippy::print_stdout)]

use std::time::Duration;

use clap::{Parser, Subcommand};
use shopfront_storefront::catalog::CatalogClient;
use shopfront_storefront::config::{CatalogApiConfig, DEFAULT_CATALOG_API_URL};
use url::Url;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront catalog and checkout CLI")]
struct Cli {
    /// Catalog and order API base URL
    #[arg(long, global = true, env = "CATALOG_API_URL", default_value = DEFAULT_CATALOG_API_URL)]
    api_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with filters, sorting and pagination
    Products(commands::products::ProductsArgs),
    /// Show a single product
    Product {
        /// Product ID
        id: String,
    },
    /// Validate and submit a checkout
    Checkout(commands::checkout::CheckoutArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cli=info,shopfront_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let client = CatalogClient::new(&CatalogApiConfig {
        base_url: cli.api_url,
        cache_ttl: Duration::from_secs(60),
    });
    tracing::debug!(api_url = %client.base_url(), "Using catalog API");

    match cli.command {
        Commands::Products(args) => commands::products::run(&client, args).await,
        Commands::Product { id } => commands::product::run(&client, &id).await,
        Commands::Checkout(args) => commands::checkout::run(&client, args).await,
    }
}
