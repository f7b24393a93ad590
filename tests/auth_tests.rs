//! Authentication matrix for the protected route.

mod support;

use axum::http::StatusCode;
use ordergate::testkit::{expired_token, forged_token, subjectless_token, test_token};
use serde_json::json;

use support::{call, make_router, order_request, parse_json};

fn order_body() -> serde_json::Value {
    json!({"user_id": "u123", "amount": 999})
}

#[tokio::test]
async fn missing_authorization_header_is_forbidden() {
    let (router, queue, _store) = make_router();
    let (status, _, body) = call(router, order_request(None, order_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(parse_json(&body)["detail"], "not authenticated");
    assert_eq!(queue.publish_count(), 0);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let (router, _queue, _store) = make_router();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .header("authorization", "Token abc123")
        .body(axum::body::Body::from(order_body().to_string()))
        .expect("request builds");
    let (status, _, _) = call(router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_bearer_value_is_unauthorized() {
    let (router, queue, _store) = make_router();
    let (status, _, _) = call(router, order_request(Some("invalid"), order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(queue.publish_count(), 0);
}

#[tokio::test]
async fn malformed_jwt_is_unauthorized() {
    let (router, _queue, _store) = make_router();
    let (status, _, _) =
        call(router, order_request(Some("not.a.valid.token"), order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let (router, queue, _store) = make_router();
    let token = expired_token("u123");
    let (status, _, _) = call(router, order_request(Some(&token), order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(queue.publish_count(), 0);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let (router, _queue, _store) = make_router();
    let token = forged_token("u123");
    let (status, _, _) = call(router, order_request(Some(&token), order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_subject_is_unauthorized() {
    let (router, queue, _store) = make_router();
    let token = subjectless_token();
    let (status, _, _) = call(router, order_request(Some(&token), order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(queue.publish_count(), 0);
}

#[tokio::test]
async fn valid_token_is_accepted() {
    let (router, _queue, _store) = make_router();
    let token = test_token("u123");
    let (status, _, _) = call(router, order_request(Some(&token), order_body())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}
