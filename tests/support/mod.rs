#![allow(dead_code)]

//! In-process router test helpers.
//!
//! Tests drive the bare router without binding a TCP socket, via
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use tower::ServiceExt; // oneshot

use ordergate::testkit::{test_config, test_router, RecordingQueue, StaticStore};

/// Fixed URL the store fake mints for accepted orders.
pub const FAKE_POLL_URL: &str = "https://status.example.com/test-table/poll";

/// A fully configured router over fresh recording fakes.
pub fn make_router() -> (axum::Router, Arc<RecordingQueue>, Arc<StaticStore>) {
    let queue = Arc::new(RecordingQueue::new());
    let store = Arc::new(StaticStore::new(FAKE_POLL_URL));
    let router = test_router(test_config(), queue.clone(), store.clone());
    (router, queue, store)
}

/// Drive the router with one request; return status, headers, and body.
pub async fn call(
    router: axum::Router,
    req: Request<Body>,
) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.oneshot(req).await.expect("oneshot failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, headers, body)
}

/// Parse body bytes as a `serde_json::Value`.
pub fn parse_json(body: &Bytes) -> serde_json::Value {
    serde_json::from_slice(body).expect("body is not valid JSON")
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

/// Build a POST /orders request, optionally with a bearer token.
pub fn order_request(token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}
