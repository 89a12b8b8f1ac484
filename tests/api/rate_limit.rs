//! tests/api/rate_limit.rs

use crate::helpers::{assert_too_many_requests, setup};

#[tokio::test]
async fn landing_page_allows_six_requests_a_minute() {
    // Arrange
    let test = setup().await;

    // Act
    for _ in 0..6 {
        let response = test.get("/").await;
        assert_eq!(200, response.status().as_u16());
    }
    let response = test.get("/").await;

    // Assert
    assert_too_many_requests(response).await;
}

#[tokio::test]
async fn waitlist_allows_two_submissions_per_five_minutes() {
    // Arrange
    let test = setup().await;
    test.store_accepts(2).await;
    test.email_accepts(2).await;
    let body = "name=Ada&email=ada%40example.com";

    // Act
    for _ in 0..2 {
        let response = test.post_waitlist(body.into()).await;
        assert_eq!(200, response.status().as_u16());
    }
    let third = test.post_waitlist(body.into()).await;
    let fourth = test.post_waitlist(body.into()).await;

    // Assert
    assert_too_many_requests(third).await;
    assert_too_many_requests(fourth).await;
    // Mocks verify on Drop that the rejected requests never reached the store
}

#[tokio::test]
async fn rejected_submissions_count_against_the_limit() {
    // Arrange
    let test = setup().await;

    // Act
    for _ in 0..2 {
        let response = test.post_waitlist("email=not-an-email".into()).await;
        assert_eq!(422, response.status().as_u16());
    }
    let response = test.post_waitlist("email=ada%40example.com".into()).await;

    // Assert
    assert_too_many_requests(response).await;
}

#[tokio::test]
async fn limiters_are_independent_per_route() {
    // Arrange
    let test = setup().await;
    test.store_accepts(2).await;
    test.email_accepts(2).await;

    // Act
    for _ in 0..2 {
        test.post_waitlist("email=ada%40example.com".into()).await;
    }
    let response = test.get("/").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn other_methods_on_the_waitlist_endpoint_do_not_use_up_submissions() {
    // Arrange
    let test = setup().await;
    test.store_accepts(2).await;
    test.email_accepts(2).await;

    // Act
    for _ in 0..3 {
        let response = test.get("/api/waitlist").await;
        assert_eq!(405, response.status().as_u16());
    }

    // Assert
    for _ in 0..2 {
        let response = test.post_waitlist("email=ada%40example.com".into()).await;
        assert_eq!(200, response.status().as_u16());
    }
}
