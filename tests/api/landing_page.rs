//! tests/api/landing_page.rs

use crate::helpers::{assert_is_redirect_to, setup};

#[tokio::test]
async fn landing_page_is_served_as_html() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.get("/").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let content_type = response.headers().get("Content-Type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"action="/api/waitlist""#));
}

#[tokio::test]
async fn static_assets_are_served() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.get("/static/style.css").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn unknown_paths_redirect_to_the_landing_page() {
    // Arrange
    let test = setup().await;

    for path in ["/does-not-exist", "/api/unknown", "/admin/dashboard"] {
        // Act
        let response = test.get(path).await;

        // Assert
        assert_is_redirect_to(&response, "/");
    }
}
