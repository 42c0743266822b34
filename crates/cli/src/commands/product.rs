//! `shopfront product`: one product with stock and options.

use shopfront_core::ProductId;
use shopfront_core::detail::StockStatus;
use shopfront_storefront::catalog::CatalogClient;

use super::CommandError;

pub async fn run(client: &CatalogClient, id: &str) -> Result<(), CommandError> {
    let product = client.product(&ProductId::new(id.trim())).await?;

    println!("{} ({})", product.name, product.id);
    println!("Brand:    {}", product.brand);
    println!("Category: {}", product.category);
    println!("Price:    {}", product.price.display());
    println!("Stock:    {}", StockStatus::of(product.stock_quantity).label());
    if !product.release_date.is_empty() {
        println!("Released: {}", product.release_date);
    }
    if let Some(group) = &product.option_group {
        println!("{}: {}", group.name, group.choices.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}
