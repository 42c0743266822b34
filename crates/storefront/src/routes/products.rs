//! Product route handlers.
//!
//! The listing page keeps every filter in the query string so links can be
//! shared and the back button works. Changing a filter submits the filter form
//! without a `page`, which lands the shopper on page 1.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shopfront_core::catalog::{self, CategoryFilter, FilterState, PriceRange, SortKey};
use shopfront_core::detail::{ImageSize, StockStatus, placeholder_image};
use shopfront_core::pagination::{DEFAULT_WINDOW, PRODUCTS_PER_PAGE};
use shopfront_core::{Page, Price, Product, ProductId};
use tracing::instrument;
use url::form_urlencoded;

use crate::catalog::CatalogError;
use crate::middleware::CartSession;
use crate::state::AppState;

/// Path of the listing page.
pub const LISTING_PATH: &str = "/products";

// =============================================================================
// Listing Query
// =============================================================================

/// Filters and page parsed from the listing query string.
///
/// Unknown keys are ignored and unparseable values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub filters: FilterState,
    pub page: u32,
}

impl ListingParams {
    /// Parse `brand` (repeatable), `category`, `min_price`, `max_price`,
    /// `sort` and `page`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut filters = FilterState::default();
        let mut page = 1;
        let mut min_price = None;
        let mut max_price = None;

        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "brand" => {
                    let brand = value.trim();
                    if !brand.is_empty() {
                        filters.brands.insert(brand.to_owned());
                    }
                }
                "category" => filters.category = CategoryFilter::parse(&value),
                "min_price" => min_price = value.parse::<Price>().ok(),
                "max_price" => max_price = value.parse::<Price>().ok(),
                "sort" => filters.sort = value.parse::<SortKey>().ok(),
                "page" => page = value.trim().parse::<u32>().unwrap_or(1).max(1),
                _ => {}
            }
        }

        let mut price = PriceRange::default();
        if let Some(min) = min_price {
            price = price.with_min(min);
        }
        if let Some(max) = max_price {
            price = price.with_max(max);
        }
        filters.price = price;

        Self { filters, page }
    }

    /// Listing URL for these filters on `page`. Default values are omitted.
    #[must_use]
    pub fn href(&self, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for brand in &self.filters.brands {
            query.append_pair("brand", brand);
        }
        if let CategoryFilter::Named(name) = &self.filters.category {
            query.append_pair("category", name);
        }
        let defaults = PriceRange::default();
        if self.filters.price.min() != defaults.min() {
            query.append_pair("min_price", &self.filters.price.min().plain());
        }
        if self.filters.price.max() != defaults.max() {
            query.append_pair("max_price", &self.filters.price.max().plain());
        }
        if let Some(sort) = self.filters.sort {
            query.append_pair("sort", sort.as_str());
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }

        let query = query.finish();
        if query.is_empty() {
            LISTING_PATH.to_string()
        } else {
            format!("{LISTING_PATH}?{query}")
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Product card data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub href: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub image: String,
    pub in_stock: bool,
    /// Whether the card's button adds straight to the cart.
    pub quick_add: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            href: product_href(&product.id),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.display(),
            image: placeholder_image(&product.category, ImageSize::Thumbnail),
            in_stock: product.in_stock(),
            quick_add: product.in_stock() && !product.requires_option(),
        }
    }
}

/// A checkbox, radio or select entry in the filter form.
#[derive(Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A numbered link in the pager.
#[derive(Clone)]
pub struct PageLinkView {
    pub number: u32,
    pub href: String,
    pub is_current: bool,
}

/// Pager below the listing grid.
#[derive(Clone, Default)]
pub struct PagerView {
    pub visible: bool,
    /// Empty when on the first page.
    pub previous_href: String,
    /// Empty when on the last page.
    pub next_href: String,
    pub pages: Vec<PageLinkView>,
}

impl PagerView {
    fn new<T>(page: &Page<T>, params: &ListingParams) -> Self {
        if !page.needs_pager() {
            return Self::default();
        }

        Self {
            visible: true,
            previous_href: if page.has_previous() {
                params.href(page.number - 1)
            } else {
                String::new()
            },
            next_href: if page.has_next() {
                params.href(page.number + 1)
            } else {
                String::new()
            },
            pages: page
                .window(DEFAULT_WINDOW)
                .into_iter()
                .map(|number| PageLinkView {
                    number,
                    href: params.href(number),
                    is_current: number == page.number,
                })
                .collect(),
        }
    }
}

/// Option `<select>` entry on the product page.
#[derive(Clone)]
pub struct OptionChoiceView {
    pub value: String,
    pub selected: bool,
}

/// Product detail data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
    pub has_options: bool,
    /// Option group label, e.g. "Size".
    pub option_name: String,
    pub option_choices: Vec<OptionChoiceView>,
    pub stock_label: String,
    pub stock_class: String,
}

impl ProductDetailView {
    /// Build the view, marking `selected` as the chosen option.
    #[must_use]
    pub fn new(product: &Product, selected: Option<&str>) -> Self {
        let stock = StockStatus::of(product.stock_quantity);
        let (option_name, option_choices) =
            product
                .option_group
                .as_ref()
                .map_or_else(Default::default, |group| {
                    let choices = group
                        .choices
                        .iter()
                        .map(|choice| OptionChoiceView {
                            value: choice.clone(),
                            selected: selected == Some(choice.as_str()),
                        })
                        .collect();
                    (group.name.clone(), choices)
                });

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.display(),
            description: product.description.clone(),
            image: placeholder_image(&product.category, ImageSize::Detail),
            in_stock: product.in_stock(),
            has_options: product.option_group.is_some(),
            option_name,
            option_choices,
            stock_label: stock.label(),
            stock_class: stock.css_class().to_string(),
        }
    }
}

/// Link to a product page.
#[must_use]
pub fn product_href(id: &ProductId) -> String {
    // byte_serialize writes spaces as '+' and escapes a literal '+'
    let encoded = form_urlencoded::byte_serialize(id.as_str().as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("{LISTING_PATH}/{encoded}")
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cart_count: u64,
    pub products: Vec<ProductCardView>,
    pub total_products: usize,
    pub brands: Vec<ChoiceView>,
    pub categories: Vec<ChoiceView>,
    pub sort_options: Vec<ChoiceView>,
    pub min_price: String,
    pub max_price: String,
    pub price_floor: u32,
    pub price_ceiling: u32,
    pub pager: PagerView,
    /// Where quick-add returns to.
    pub current_href: String,
    /// Empty unless the filtered result is empty.
    pub empty_message: String,
    pub show_clear_filters: bool,
}

/// Listing page shown when the catalog API cannot be reached.
#[derive(Template, WebTemplate)]
#[template(path = "products/error.html")]
pub struct ListingErrorTemplate {
    pub cart_count: u64,
    pub retry_href: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart_count: u64,
    pub product: ProductDetailView,
    /// Why the last add-to-cart attempt was refused; empty if it wasn't.
    pub error: String,
    pub added: bool,
}

/// Product page shown when the product cannot be loaded.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductErrorTemplate {
    pub cart_count: u64,
    pub title: String,
    pub message: String,
}

impl ProductErrorTemplate {
    /// Page for a failed product fetch, with its status code.
    #[must_use]
    pub fn for_error(error: &CatalogError, cart_count: u64) -> (StatusCode, Self) {
        match error {
            CatalogError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Self {
                    cart_count,
                    title: "Product Not Found".to_string(),
                    message: "Product not found".to_string(),
                },
            ),
            _ => (
                StatusCode::BAD_GATEWAY,
                Self {
                    cart_count,
                    title: "Error Loading Product".to_string(),
                    message: "Failed to fetch product".to_string(),
                },
            ),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: CartSession,
    RawQuery(query): RawQuery,
) -> Response {
    let cart_count = session.load().await.total_items();
    let params = ListingParams::parse(query.as_deref());

    let products = match state.catalog().products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load products");
            let template = ListingErrorTemplate {
                cart_count,
                retry_href: params.href(params.page),
            };
            return (StatusCode::BAD_GATEWAY, template).into_response();
        }
    };

    // Facets degrade to empty lists; the grid still renders without them.
    let brands = state.catalog().brands().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load brands");
        Vec::new()
    });
    let categories = state.catalog().categories().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories");
        Vec::new()
    });

    let matching = catalog::apply(&products, &params.filters);
    let page = Page::slice(&matching, params.page, PRODUCTS_PER_PAGE);

    let empty_message = if !page.items.is_empty() {
        String::new()
    } else if params.filters.is_narrowed() {
        "No products found for the current filters.".to_string()
    } else {
        "No products available.".to_string()
    };

    let brand_choices = brands
        .iter()
        .map(|brand| ChoiceView {
            value: brand.name.clone(),
            label: brand.name.clone(),
            selected: params.filters.brands.contains(&brand.name),
        })
        .collect();

    let category_choices = std::iter::once(CategoryFilter::ALL_LABEL.to_string())
        .chain(categories.iter().map(|category| category.name.clone()))
        .map(|name| ChoiceView {
            selected: params.filters.category.as_str() == name,
            label: name.clone(),
            value: name,
        })
        .collect();

    let sort_choices = SortKey::ALL
        .into_iter()
        .map(|key| ChoiceView {
            value: key.as_str().to_string(),
            label: key.label().to_string(),
            selected: params.filters.sort == Some(key),
        })
        .collect();

    ProductsIndexTemplate {
        cart_count,
        products: page.items.iter().map(ProductCardView::from).collect(),
        total_products: page.total_items,
        brands: brand_choices,
        categories: category_choices,
        sort_options: sort_choices,
        min_price: params.filters.price.min().plain(),
        max_price: params.filters.price.max().plain(),
        price_floor: PriceRange::FLOOR,
        price_ceiling: PriceRange::CEILING,
        pager: PagerView::new(&page, &params),
        current_href: params.href(page.number),
        show_clear_filters: page.items.is_empty() && params.filters.is_narrowed(),
        empty_message,
    }
    .into_response()
}

/// Query parameters of the product page.
#[derive(Debug, Deserialize)]
pub struct ShowQuery {
    #[serde(default)]
    pub added: Option<String>,
}

/// Display the product detail page.
#[instrument(skip(state, session, query))]
pub async fn show(
    State(state): State<AppState>,
    session: CartSession,
    Path(id): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Response {
    let cart_count = session.load().await.total_items();

    match state.catalog().product(&ProductId::new(id)).await {
        Ok(product) => ProductShowTemplate {
            cart_count,
            product: ProductDetailView::new(&product, None),
            error: String::new(),
            added: query.added.is_some(),
        }
        .into_response(),
        Err(e) => {
            if !matches!(e, CatalogError::NotFound(_)) {
                tracing::warn!(error = %e, "Failed to load product");
            }
            ProductErrorTemplate::for_error(&e, cart_count).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_query() {
        let params = ListingParams::parse(None);
        assert_eq!(params.filters, FilterState::default());
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_parse_full_query() {
        let params = ListingParams::parse(Some(
            "brand=Nike&brand=Acme+Co&category=Shoes&min_price=20&max_price=150.5&sort=price_desc&page=3",
        ));
        assert!(params.filters.brands.contains("Nike"));
        assert!(params.filters.brands.contains("Acme Co"));
        assert_eq!(
            params.filters.category,
            CategoryFilter::Named("Shoes".to_string())
        );
        assert_eq!(params.filters.price.min(), Price::from_dollars(20));
        assert_eq!(params.filters.price.max(), Price::from_cents(15050));
        assert_eq!(params.filters.sort, Some(SortKey::PriceDesc));
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let params = ListingParams::parse(Some("sort=cheapest&page=zero&min_price=abc&x=1"));
        assert_eq!(params.filters, FilterState::default());
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_parse_clamps_price() {
        let params = ListingParams::parse(Some("min_price=-10&max_price=9000"));
        assert!(!params.filters.is_narrowed());
    }

    #[test]
    fn test_href_roundtrip() {
        let raw = "brand=Acme+Co&category=Shirts&max_price=80&sort=release_date_asc&page=2";
        let params = ListingParams::parse(Some(raw));
        assert_eq!(params.href(2), format!("/products?{raw}"));
        assert_eq!(ListingParams::parse(Some("page=4")).href(1), "/products");
    }

    #[test]
    fn test_product_href_encodes_id() {
        assert_eq!(product_href(&ProductId::new("a/b")), "/products/a%2Fb");
        assert_eq!(product_href(&ProductId::new("a b")), "/products/a%20b");
    }

    #[test]
    fn test_product_error_page_by_failure() {
        let (status, page) =
            ProductErrorTemplate::for_error(&CatalogError::NotFound(ProductId::new("9")), 2);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(page.title, "Product Not Found");
        assert_eq!(page.cart_count, 2);

        let (status, page) = ProductErrorTemplate::for_error(
            &CatalogError::Status(StatusCode::INTERNAL_SERVER_ERROR),
            0,
        );
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(page.title, "Error Loading Product");
        assert_eq!(page.message, "Failed to fetch product");
    }
}
