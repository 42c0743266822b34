//! Catalog and order API client.
//!
//! # Architecture
//!
//! - The external API is the source of truth for products, brands and
//!   categories; nothing is stored locally
//! - Reads are cached in memory via `moka` for the configured stale time
//! - Checkout submissions always go to the API and are never cached
//! - Requests are issued once; there is no retry or backoff
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let products = client.products().await?;
//! let product = client.product(&products[0].id).await?;
//! ```

mod cache;

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shopfront_core::{Brand, Category, CheckoutForm, CheckoutOutcome, Product, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogApiConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {0}")]
    Status(StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The configured base URL cannot have paths appended.
    #[error("Invalid catalog API URL: {0}")]
    InvalidBaseUrl(String),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog and order API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// The API base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CatalogError> {
        let url = self.endpoint(segments)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                tracing::error!(
                    status = %status,
                    body = %truncate(&response_text, 500),
                    "Catalog API returned non-success status"
                );
            }
            return Err(CatalogError::Status(status));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&response_text, 500),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Catalog Reads
    // =========================================================================

    /// Get every product, in the order the API lists them.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is malformed.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json(&["products"]).await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the API answers 404, or another
    /// error if the request fails or the payload is malformed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id.clone());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = match self.get_json(&["products", id.as_str()]).await {
            Err(CatalogError::Status(StatusCode::NOT_FOUND)) => {
                return Err(CatalogError::NotFound(id.clone()));
            }
            other => other?,
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the brand lookup list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is malformed.
    #[instrument(skip(self))]
    pub async fn brands(&self) -> Result<Vec<Brand>, CatalogError> {
        if let Some(CacheValue::Brands(brands)) = self.inner.cache.get(&CacheKey::Brands).await {
            debug!("Cache hit for brands");
            return Ok(brands);
        }

        let brands: Vec<Brand> = self.get_json(&["brands"]).await?;

        self.inner
            .cache
            .insert(CacheKey::Brands, CacheValue::Brands(brands.clone()))
            .await;

        Ok(brands)
    }

    /// Get the category lookup list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is malformed.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json(&["categories"]).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Post a checkout form to the order API.
    ///
    /// A 2xx response is interpreted by [`CheckoutOutcome::from_response_body`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    #[instrument(skip(self, form))]
    pub async fn submit_checkout(
        &self,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, CatalogError> {
        let url = self.endpoint(&["checkout"])?;
        let response = self.inner.client.post(url).json(form).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&response_text, 500),
                "Order API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let outcome = CheckoutOutcome::from_response_body(&response_text);
        if !outcome.is_accepted() {
            tracing::warn!(
                body = %truncate(&response_text, 200),
                "Order API declined checkout"
            );
        }
        Ok(outcome)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
