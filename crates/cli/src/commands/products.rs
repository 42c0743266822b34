//! `shopfront products`: the listing pipeline on the command line.

use clap::Args;
use shopfront_core::catalog::{self, CategoryFilter, FilterState, PriceRange, SortKey};
use shopfront_core::pagination::{DEFAULT_WINDOW, PRODUCTS_PER_PAGE};
use shopfront_core::{Page, Price};
use shopfront_storefront::catalog::CatalogClient;

use super::CommandError;

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Only show this brand (repeatable)
    #[arg(long = "brand")]
    brands: Vec<String>,

    /// Only show this category ("All" for every category)
    #[arg(long)]
    category: Option<String>,

    /// Lowest price in dollars
    #[arg(long)]
    min_price: Option<String>,

    /// Highest price in dollars
    #[arg(long)]
    max_price: Option<String>,

    /// Sort order: `release_date_desc`, `release_date_asc`, `price_desc` or `price_asc`
    #[arg(long)]
    sort: Option<SortKey>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,
}

impl ProductsArgs {
    fn filters(&self) -> Result<FilterState, CommandError> {
        let mut price = PriceRange::default();
        if let Some(min) = &self.min_price {
            price = price.with_min(parse_price("--min-price", min)?);
        }
        if let Some(max) = &self.max_price {
            price = price.with_max(parse_price("--max-price", max)?);
        }

        Ok(FilterState {
            brands: self
                .brands
                .iter()
                .map(|brand| brand.trim().to_owned())
                .filter(|brand| !brand.is_empty())
                .collect(),
            category: self
                .category
                .as_deref()
                .map_or(CategoryFilter::All, CategoryFilter::parse),
            price,
            sort: self.sort,
        })
    }
}

fn parse_price(arg: &'static str, value: &str) -> Result<Price, CommandError> {
    value
        .parse::<Price>()
        .map_err(|e| CommandError::InvalidArgument(arg, e.to_string()))
}

/// Fetch, filter, sort and page the catalog, then print one page.
pub async fn run(client: &CatalogClient, args: ProductsArgs) -> Result<(), CommandError> {
    let filters = args.filters()?;
    let products = client.products().await?;
    tracing::info!(fetched = products.len(), "Loaded products");

    let matching = catalog::apply(&products, &filters);
    let page = Page::slice(&matching, args.page, PRODUCTS_PER_PAGE);

    if page.items.is_empty() {
        if filters.is_narrowed() {
            println!("No products found for the current filters.");
        } else {
            println!("No products available.");
        }
        return Ok(());
    }

    for product in &page.items {
        let stock = if product.in_stock() {
            product.stock_quantity.to_string()
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:>6}  {:<40} {:<16} {:>10}  {}",
            product.id.as_str(),
            product.name,
            product.brand,
            product.price.display(),
            stock
        );
    }

    println!();
    println!(
        "Page {} of {} ({} products)",
        page.number, page.total_pages, page.total_items
    );
    if page.needs_pager() {
        let window = page
            .window(DEFAULT_WINDOW)
            .into_iter()
            .map(|n| {
                if n == page.number {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("Pages: {window}");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ProductsArgs,
    }

    fn parse(argv: &[&str]) -> ProductsArgs {
        TestCli::try_parse_from(std::iter::once("products").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_defaults_are_unfiltered() {
        let args = parse(&[]);
        let filters = args.filters().unwrap();
        assert_eq!(filters, FilterState::default());
        assert_eq!(args.page, 1);
    }

    #[test]
    fn test_full_filter_set() {
        let args = parse(&[
            "--brand", "Nike", "--brand", "Adidas", "--category", "Shoes", "--min-price", "20",
            "--max-price", "150", "--sort", "price_asc", "--page", "2",
        ]);
        let filters = args.filters().unwrap();
        assert_eq!(filters.brands.len(), 2);
        assert_eq!(filters.category, CategoryFilter::Named("Shoes".to_string()));
        assert_eq!(filters.price.min(), Price::from_dollars(20));
        assert_eq!(filters.price.max(), Price::from_dollars(150));
        assert_eq!(filters.sort, Some(SortKey::PriceAsc));
        assert_eq!(args.page, 2);
    }

    #[test]
    fn test_price_is_clamped() {
        let filters = parse(&["--max-price", "9000"]).filters().unwrap();
        assert_eq!(filters.price.max(), Price::from_dollars(PriceRange::CEILING));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse(&["--min-price", "cheap"]).filters().is_err());
        assert!(TestCli::try_parse_from(["products", "--sort", "popular"]).is_err());
    }
}
