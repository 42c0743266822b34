//! Product page rules: when a product may go in the cart, how stock is shown
//! and which placeholder picture stands in for product photography.

use crate::types::Product;

/// Stock below this count (but above zero) is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Why a product cannot be added to the cart right now.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddToCartBlocked {
    #[error("Out of Stock")]
    OutOfStock,
    #[error("Please select a {} before adding to cart", option_name.to_lowercase())]
    OptionRequired { option_name: String },
    #[error("\"{choice}\" is not an available {}", option_name.to_lowercase())]
    UnknownOption { option_name: String, choice: String },
}

/// Decide whether `product` may be added with `selected` as its option.
///
/// Returns the option list to store on the cart line: the chosen option for
/// products with an option group, otherwise empty. An empty selection counts
/// as no selection. Stock is checked before options.
///
/// # Errors
///
/// Returns the first [`AddToCartBlocked`] reason that applies.
pub fn check_add_to_cart(
    product: &Product,
    selected: Option<&str>,
) -> Result<Vec<String>, AddToCartBlocked> {
    if !product.in_stock() {
        return Err(AddToCartBlocked::OutOfStock);
    }

    let Some(group) = &product.option_group else {
        return Ok(Vec::new());
    };

    match selected.map(str::trim).filter(|choice| !choice.is_empty()) {
        None => Err(AddToCartBlocked::OptionRequired {
            option_name: group.name.clone(),
        }),
        Some(choice) if group.contains(choice) => Ok(vec![choice.to_owned()]),
        Some(choice) => Err(AddToCartBlocked::UnknownOption {
            option_name: group.name.clone(),
            choice: choice.to_owned(),
        }),
    }
}

/// Boolean form of [`check_add_to_cart`].
#[must_use]
pub fn can_add_to_cart(product: &Product, selected: Option<&str>) -> bool {
    check_add_to_cart(product, selected).is_ok()
}

/// Stock level as shown next to "Available Quantity".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low(u32),
    Available(u32),
}

impl StockStatus {
    #[must_use]
    pub const fn of(stock_quantity: u32) -> Self {
        match stock_quantity {
            0 => Self::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => Self::Low(n),
            n => Self::Available(n),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::OutOfStock => "Out of stock".to_owned(),
            Self::Low(n) | Self::Available(n) => n.to_string(),
        }
    }

    /// CSS modifier used to colour the label.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::OutOfStock => "stock-out",
            Self::Low(_) => "stock-low",
            Self::Available(_) => "stock-ok",
        }
    }
}

/// Where a placeholder image is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Listing card, 230x240.
    Thumbnail,
    /// Product page, 600x600.
    Detail,
}

impl ImageSize {
    const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Thumbnail => (230, 240),
            Self::Detail => (600, 600),
        }
    }
}

/// Stock photo URL for a product category.
#[must_use]
pub fn placeholder_image(category: &str, size: ImageSize) -> String {
    let photo = match category {
        "Shoes" => "photo-1549298916-b41d501d3772",
        "Shirts" => "photo-1521572163474-6864f9cf17ab",
        "Electronics" => "photo-1505740420928-5e560c06d30e",
        _ => "photo-1560472354-b33ff0c44a43",
    };
    let (width, height) = size.dimensions();
    format!("https://images.unsplash.com/{photo}?w={width}&h={height}&fit=crop")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{OptionGroup, Price, ProductId};

    fn shoe(stock: u32) -> Product {
        Product {
            id: ProductId::new("7"),
            name: "Trail".to_string(),
            price: Price::from_dollars(99),
            description: String::new(),
            category: "Shoes".to_string(),
            brand: "Acme".to_string(),
            stock_quantity: stock,
            release_date: String::new(),
            option_group: Some(OptionGroup {
                kind: "size".to_string(),
                name: "Size".to_string(),
                choices: vec!["41".to_string(), "42".to_string()],
            }),
        }
    }

    #[test]
    fn test_out_of_stock_blocks_regardless_of_option() {
        let product = shoe(0);
        assert_eq!(
            check_add_to_cart(&product, Some("42")),
            Err(AddToCartBlocked::OutOfStock)
        );
        assert!(!can_add_to_cart(&product, None));
    }

    #[test]
    fn test_option_required() {
        let err = check_add_to_cart(&shoe(3), None).unwrap_err();
        assert_eq!(err.to_string(), "Please select a size before adding to cart");
        assert!(!can_add_to_cart(&shoe(3), Some("")));
    }

    #[test]
    fn test_unknown_option() {
        assert!(matches!(
            check_add_to_cart(&shoe(3), Some("50")),
            Err(AddToCartBlocked::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_valid_option_returns_selection() {
        assert_eq!(check_add_to_cart(&shoe(3), Some("42")).unwrap(), vec!["42"]);
    }

    #[test]
    fn test_product_without_options_ignores_selection() {
        let mut product = shoe(1);
        product.option_group = None;
        assert!(check_add_to_cart(&product, Some("whatever")).unwrap().is_empty());
        assert!(can_add_to_cart(&product, None));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::of(0).label(), "Out of stock");
        assert_eq!(StockStatus::of(4), StockStatus::Low(4));
        assert_eq!(StockStatus::of(5), StockStatus::Available(5));
        assert_eq!(StockStatus::of(12).label(), "12");
    }

    #[test]
    fn test_placeholder_image() {
        assert_eq!(
            placeholder_image("Shirts", ImageSize::Thumbnail),
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=230&h=240&fit=crop"
        );
        assert!(placeholder_image("Toys", ImageSize::Detail)
            .ends_with("photo-1560472354-b33ff0c44a43?w=600&h=600&fit=crop"));
    }
}
