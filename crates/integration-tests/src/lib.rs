//! Integration tests for the Shopfront storefront.
//!
//! Each test starts two servers on ephemeral ports: a fake catalog and order
//! API with a fixed product fixture, and the real storefront router pointed
//! at it. Tests then drive the storefront with a cookie-holding `reqwest`
//! client, exactly as a browser submitting plain forms would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Fake API behaviour
//!
//! - `GET /products` lists the fixture; `GET /products/{id}` answers 404 for
//!   unknown ids and HTTP 500 for [`BROKEN_PRODUCT_ID`].
//! - A context made with [`TestContext::with_catalog_down`] answers HTTP 500
//!   on both product endpoints.
//! - `POST /checkout` answers `success` unless the zip code is `99999`
//!   (declined body) or `00000` (HTTP 500). Every accepted JSON body is
//!   recorded in [`TestContext::orders`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use reqwest::Client;
use serde_json::{Value, json};
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::state::AppState;

/// Zip code the fake order API declines with a non-success body.
pub const DECLINED_ZIP: &str = "99999";

/// Zip code the fake order API answers with HTTP 500.
pub const BROKEN_ZIP: &str = "00000";

/// Product id the fake API fails with HTTP 500.
pub const BROKEN_PRODUCT_ID: &str = "500";

/// Checkout bodies received by the fake order API.
pub type Orders = Arc<Mutex<Vec<Value>>>;

/// The product fixture served by the fake API.
///
/// Ids 1-3 are hand-written; 4-12 are filler socks so the listing spans two
/// pages.
#[must_use]
pub fn fixture_products() -> Vec<Value> {
    let mut products = vec![
        json!({
            "id": 1,
            "product_name": "Trail Runner",
            "price": 120,
            "description": "Grippy trail shoe.",
            "category": "Shoes",
            "brand": "Nike",
            "stock_quantity": 10,
            "release_date": "2024-03-01",
            "selectible_option": {
                "option_type": "size",
                "option_name": "Size",
                "option": [40, 41, 42]
            }
        }),
        json!({
            "id": 2,
            "product_name": "Classic Tee",
            "price": 25.5,
            "description": null,
            "category": "Shirts",
            "brand": "Acme",
            "stock_quantity": 3,
            "release_date": "2024-02-01",
            "selectible_option": null
        }),
        json!({
            "id": 3,
            "product_name": "Sold Out Cap",
            "price": 15,
            "description": "",
            "category": "Hats",
            "brand": "Acme",
            "stock_quantity": 0,
            "release_date": "2023-12-01",
            "selectible_option": null
        }),
    ];

    products.extend((4..=12).map(|id| {
        json!({
            "id": id,
            "product_name": format!("Basic Sock {id}"),
            "price": 5 + id,
            "description": "",
            "category": "Socks",
            "brand": "Acme",
            "stock_quantity": 50,
            "release_date": format!("2023-01-{id:02}"),
            "selectible_option": null
        })
    }));

    products
}

#[derive(Clone, Default)]
struct FakeApi {
    orders: Orders,
    catalog_down: Arc<AtomicBool>,
}

impl FakeApi {
    fn check_catalog(&self) -> Result<(), StatusCode> {
        if self.catalog_down.load(Ordering::Relaxed) {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            Ok(())
        }
    }
}

async fn list_products(State(api): State<FakeApi>) -> Result<Json<Value>, StatusCode> {
    api.check_catalog()?;
    Ok(Json(Value::Array(fixture_products())))
}

async fn get_product(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    api.check_catalog()?;
    if id == BROKEN_PRODUCT_ID {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    fixture_products()
        .into_iter()
        .find(|product| product["id"].to_string() == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_brands() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Acme" }, { "id": 2, "name": "Nike" }]))
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Shoes" },
        { "id": 2, "name": "Shirts" },
        { "id": 3, "name": "Hats" },
        { "id": 4, "name": "Socks" }
    ]))
}

async fn checkout(
    State(api): State<FakeApi>,
    Json(body): Json<Value>,
) -> Result<&'static str, StatusCode> {
    match body["zipCode"].as_str() {
        Some(BROKEN_ZIP) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        Some(DECLINED_ZIP) => Ok("Order could not be processed"),
        _ => {
            if let Ok(mut orders) = api.orders.lock() {
                orders.push(body);
            }
            Ok("success")
        }
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });
    format!("http://{addr}")
}

/// A running storefront with its fake API and a client holding one session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub orders: Orders,
}

impl TestContext {
    /// Start the fake API and the storefront.
    ///
    /// # Panics
    ///
    /// Panics if either server cannot be started.
    pub async fn new() -> Self {
        Self::start(FakeApi::default()).await
    }

    /// Like [`new`](Self::new), but every product request to the fake API
    /// fails with HTTP 500.
    ///
    /// # Panics
    ///
    /// Panics if either server cannot be started.
    pub async fn with_catalog_down() -> Self {
        let fake = FakeApi::default();
        fake.catalog_down.store(true, Ordering::Relaxed);
        Self::start(fake).await
    }

    async fn start(fake: FakeApi) -> Self {
        let orders = fake.orders.clone();
        let api = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .route("/brands", get(list_brands))
            .route("/categories", get(list_categories))
            .route("/checkout", post(checkout))
            .with_state(fake);
        let api_url = serve(api).await;

        let config = StorefrontConfig::from_source(|key| match key {
            "CATALOG_API_URL" => Some(api_url.clone()),
            _ => None,
        })
        .expect("Invalid test configuration");
        let base_url = serve(shopfront_storefront::app(AppState::new(config))).await;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            orders,
        }
    }

    /// Absolute URL of a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page, returning status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        let status = response.status();
        (status, response.text().await.expect("Unreadable body"))
    }

    /// POST a form, following redirects, returning final status, URL path and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> (reqwest::StatusCode, String, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed");
        let status = response.status();
        let final_path = response.url().path().to_string();
        let query = response
            .url()
            .query()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        (
            status,
            format!("{final_path}{query}"),
            response.text().await.expect("Unreadable body"),
        )
    }

    /// Number shown in the header cart badge.
    ///
    /// # Panics
    ///
    /// Panics if the cart page cannot be read.
    pub async fn cart_count(&self) -> String {
        let (_, body) = self.get("/cart").await;
        body.split_once("id=\"cart-count\">")
            .and_then(|(_, rest)| rest.split_once('<'))
            .map(|(count, _)| count.to_string())
            .expect("Cart badge missing")
    }
}
