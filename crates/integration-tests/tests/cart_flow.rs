//! Cart behaviour through the storefront's forms.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use shopfront_integration_tests::TestContext;

#[tokio::test]
async fn test_cart_starts_empty() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));
    assert_eq!(ctx.cart_count().await, "0");
}

#[tokio::test]
async fn test_option_is_required_on_product_page() {
    let ctx = TestContext::new().await;
    let (status, _, body) = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("option", "")])
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Please select a size before adding to cart"));
    assert_eq!(ctx.cart_count().await, "0");
}

#[tokio::test]
async fn test_unknown_option_is_refused() {
    let ctx = TestContext::new().await;
    let (status, _, _) = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("option", "99")])
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.cart_count().await, "0");
}

#[tokio::test]
async fn test_same_product_and_option_merge() {
    let ctx = TestContext::new().await;

    let (status, path, body) = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("option", "42")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(path, "/products/1?added=1");
    assert!(body.contains("Added to cart."));

    ctx.post_form("/cart/add", &[("product_id", "1"), ("option", "42")])
        .await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("option", "41")])
        .await;

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart.matches(r#"action="/cart/remove""#).count(), 2);
    assert!(cart.contains(r#"name="quantity" value="2""#));
    assert!(cart.contains("(42)"));
    assert!(cart.contains("(41)"));
    assert!(cart.contains("Total: $360.00"));
    assert_eq!(ctx.cart_count().await, "3");
}

#[tokio::test]
async fn test_cart_image_follows_where_the_product_was_added() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("option", "42")])
        .await;
    ctx.post_form(
        "/cart/add",
        &[("product_id", "2"), ("return_to", "/products")],
    )
    .await;

    let (_, cart) = ctx.get("/cart").await;
    assert!(cart.contains("photo-1549298916-b41d501d3772?w=600"));
    assert!(cart.contains("photo-1521572163474-6864f9cf17ab?w=230"));
}

#[tokio::test]
async fn test_quick_add_returns_to_listing() {
    let ctx = TestContext::new().await;
    let (status, path, _) = ctx
        .post_form(
            "/cart/add",
            &[("product_id", "2"), ("return_to", "/products?page=2")],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(path, "/products?page=2");
    assert_eq!(ctx.cart_count().await, "1");
}

#[tokio::test]
async fn test_quick_add_ignores_offsite_return() {
    let ctx = TestContext::new().await;
    let (_, path, _) = ctx
        .post_form(
            "/cart/add",
            &[("product_id", "2"), ("return_to", "//evil.example/")],
        )
        .await;

    assert_eq!(path, "/products");
}

#[tokio::test]
async fn test_quick_add_needing_option_goes_to_product() {
    let ctx = TestContext::new().await;
    let (_, path, body) = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("return_to", "/products")])
        .await;

    assert_eq!(path, "/products/1");
    assert!(body.contains("Choose size..."));
    assert_eq!(ctx.cart_count().await, "0");
}

#[tokio::test]
async fn test_out_of_stock_is_refused() {
    let ctx = TestContext::new().await;
    let (status, _, _) = ctx.post_form("/cart/add", &[("product_id", "3")]).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.cart_count().await, "0");
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new().await;
    let (status, _, body) = ctx.post_form("/cart/add", &[("product_id", "999")]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product Not Found"));
}

#[tokio::test]
async fn test_update_quantity_and_remove_at_zero() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("option", "42")])
        .await;
    ctx.post_form("/cart/add", &[("product_id", "2")]).await;

    let (status, path, body) = ctx
        .post_form(
            "/cart/update",
            &[("product_id", "2"), ("options", "[]"), ("quantity", "4")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(path, "/cart");
    assert!(body.contains(r#"name="quantity" value="4""#));
    assert_eq!(ctx.cart_count().await, "5");

    ctx.post_form(
        "/cart/update",
        &[("product_id", "1"), ("options", r#"["42"]"#), ("quantity", "0")],
    )
    .await;
    let (_, cart) = ctx.get("/cart").await;
    assert!(!cart.contains("Trail Runner"));
    assert_eq!(ctx.cart_count().await, "4");
}

#[tokio::test]
async fn test_remove_and_clear() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "1"), ("option", "40")])
        .await;
    ctx.post_form("/cart/add", &[("product_id", "2")]).await;
    ctx.post_form("/cart/add", &[("product_id", "4")]).await;

    // Wrong option: no line matches, nothing changes
    ctx.post_form(
        "/cart/remove",
        &[("product_id", "1"), ("options", r#"["41"]"#)],
    )
    .await;
    assert_eq!(ctx.cart_count().await, "3");

    ctx.post_form(
        "/cart/remove",
        &[("product_id", "1"), ("options", r#"["40"]"#)],
    )
    .await;
    assert_eq!(ctx.cart_count().await, "2");

    let (_, path, body) = ctx.post_form("/cart/clear", &[]).await;
    assert_eq!(path, "/cart");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_malformed_line_options() {
    let ctx = TestContext::new().await;
    let (status, _, _) = ctx
        .post_form(
            "/cart/remove",
            &[("product_id", "1"), ("options", "not-json")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let first = TestContext::new().await;
    first
        .post_form("/cart/add", &[("product_id", "2")])
        .await;

    let other = reqwest::Client::new();
    let body = other
        .get(first.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty"));
    assert_eq!(first.cart_count().await, "1");
}
