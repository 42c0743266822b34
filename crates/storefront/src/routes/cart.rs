//! Cart route handlers.
//!
//! The cart lives in the visitor's session (see [`CartSession`]). Every
//! mutating handler loads it, applies one change, saves it and redirects with
//! 303 so a refresh never repeats the POST.
//!
//! Cart lines are addressed by product id plus their selected options. Forms
//! carry the options as a JSON array in a single `options` field.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::detail::{self, AddToCartBlocked, ImageSize, placeholder_image};
use shopfront_core::{Cart, CartItem, LineKey, NewCartItem, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CartSession;
use crate::routes::products::{
    LISTING_PATH, ProductDetailView, ProductErrorTemplate, ProductShowTemplate, product_href,
};
use crate::state::AppState;

/// Path of the cart page.
pub const CART_PATH: &str = "/cart";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub href: String,
    pub name: String,
    pub image: String,
    /// Selected options for display, e.g. "42".
    pub options_label: String,
    /// Selected options as the JSON array the cart forms post back.
    pub options_json: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            href: product_href(&item.product_id),
            name: item.name.clone(),
            image: item.image.clone(),
            options_label: item.options.join(", "),
            options_json: serde_json::to_string(&item.options).unwrap_or_else(|_| "[]".into()),
            quantity: item.quantity,
            unit_price: item.unit_price.display(),
            line_total: item.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
    pub total_price: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price().display(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: u64,
    pub cart: CartView,
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Absent on listing quick-add buttons; present (possibly empty) on the
    /// product page.
    pub option: Option<String>,
    /// Listing URL to come back to after a quick add.
    pub return_to: Option<String>,
}

/// Identifies one cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: String,
    #[serde(default)]
    pub options: String,
}

impl LineForm {
    fn key(&self) -> Result<LineKey> {
        line_key(&self.product_id, &self.options)
    }
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    #[serde(default)]
    pub options: String,
    pub quantity: i64,
}

fn line_key(product_id: &str, options: &str) -> Result<LineKey> {
    let options = if options.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str::<Vec<String>>(options)
            .map_err(|e| AppError::BadRequest(format!("invalid options: {e}")))?
    };
    Ok(LineKey::new(ProductId::new(product_id), options))
}

/// Only same-site paths are accepted as redirect targets.
fn safe_return_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => LISTING_PATH,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: CartSession) -> impl IntoResponse {
    let cart = session.load().await;

    CartShowTemplate {
        cart_count: cart.total_items(),
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart.
///
/// The product is re-read from the catalog so name and price never come from
/// the form. A quick add for a product that needs an option redirects to its
/// page; any other refusal re-renders the product page with the reason.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: CartSession,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut cart = session.load().await;
    let product_id = ProductId::new(form.product_id.trim());

    let product = match state.catalog().product(&product_id).await {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(error = %e, "Add to cart for unloadable product");
            return Ok(ProductErrorTemplate::for_error(&e, cart.total_items()).into_response());
        }
    };

    let options = match detail::check_add_to_cart(&product, form.option.as_deref()) {
        Ok(options) => options,
        Err(AddToCartBlocked::OptionRequired { .. }) if form.option.is_none() => {
            return Ok(Redirect::to(&product_href(&product.id)).into_response());
        }
        Err(blocked) => {
            tracing::info!(reason = %blocked, "Add to cart refused");
            let template = ProductShowTemplate {
                cart_count: cart.total_items(),
                product: ProductDetailView::new(&product, form.option.as_deref()),
                error: blocked.to_string(),
                added: false,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );

    // Quick adds carry a return path; the product page keeps its large image.
    let image_size = if form.return_to.is_some() {
        ImageSize::Thumbnail
    } else {
        ImageSize::Detail
    };
    cart.add(NewCartItem {
        product_id: product.id.clone(),
        name: product.name.clone(),
        unit_price: product.price,
        image: placeholder_image(&product.category, image_size),
        options,
    });
    session.save(&cart).await?;

    let target = form.return_to.as_deref().map_or_else(
        || format!("{}?added=1", product_href(&product.id)),
        |path| safe_return_path(Some(path)).to_string(),
    );
    Ok(Redirect::to(&target).into_response())
}

/// Change the quantity of a cart line. Zero or less removes it.
#[instrument(skip(session))]
pub async fn update(session: CartSession, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let key = line_key(&form.product_id, &form.options)?;
    let mut cart = session.load().await;

    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[
            ("product_id", key.product_id.as_str()),
            ("quantity", &form.quantity.to_string()),
        ]),
    );

    cart.set_quantity(&key, form.quantity);
    session.save(&cart).await?;

    Ok(Redirect::to(CART_PATH))
}

/// Remove a cart line.
#[instrument(skip(session))]
pub async fn remove(session: CartSession, Form(form): Form<LineForm>) -> Result<Redirect> {
    let key = form.key()?;
    let mut cart = session.load().await;

    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", key.product_id.as_str())]),
    );

    cart.remove(&key);
    session.save(&cart).await?;

    Ok(Redirect::to(CART_PATH))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: CartSession) -> Result<Redirect> {
    add_breadcrumb("cart", "Cleared cart", None);

    session.save(&Cart::new()).await?;

    Ok(Redirect::to(CART_PATH))
}
