//! Integration tests for the storefront router.
//!
//! Requests are driven through `tower::ServiceExt::oneshot`, no socket needed.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use bookstore_integration_tests::test_state;
use tower::ServiceExt;

async fn get(asset_dir: &std::path::Path, uri: &str) -> Response {
    let app = bookstore_storefront::app(test_state(asset_dir));
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
    .expect("router is infallible")
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = get(dir.path(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_catalog_lists_books_with_add_controls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = get(dir.path(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(html.matches(r#"class="book-card""#).count(), 2);
    assert!(html.contains(r#"data-id="the-hobbit""#));
    assert!(html.contains(r#"data-id="malgudi-days""#));
    assert!(html.contains(r#"data-price="399""#));
    assert!(html.contains("₹399.00"));
    assert!(html.contains("window.cartConfig"));
}

#[tokio::test]
async fn test_cart_page_is_a_widget_shell() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = get(dir.path(), "/cart").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<tbody id="cart-items"></tbody>"#));
    assert!(html.contains(r#"<div id="cart-total"></div>"#));
    assert!(html.contains("/pkg/bookstore_cart_widget.js"));
}

#[tokio::test]
async fn test_widget_bundle_is_served_uncached() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("pkg")).expect("pkg dir");
    std::fs::write(
        dir.path().join("pkg/bookstore_cart_widget.js"),
        "export default function init() {}",
    )
    .expect("bundle");

    let response = get(dir.path(), "/pkg/bookstore_cart_widget.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .expect("cache-control header"),
        "no-cache"
    );
    assert!(body_text(response).await.contains("init"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = get(dir.path(), "/checkout").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Not found: /checkout");
}
