//! Middleware stages for the HTTP surface.
//!
//! `propagate_request_id` wraps the whole router; `require_bearer` and
//! `enforce_rate_limit` are stacked on `/orders` so that auth runs first,
//! then rate limiting, then the handler body - a rejection at either stage
//! short-circuits without touching anything downstream.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header::AUTHORIZATION, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::app::AppState;
use crate::context::{RequestId, REQUEST_ID_HEADER};
use crate::error::AuthError;
use crate::limiter;

use super::error::ApiError;

/// Authenticated token subject, inserted into request extensions by
/// [`require_bearer`].
#[derive(Debug, Clone)]
pub struct Subject(pub String);

/// Adopt or mint the request's correlation id and echo it on the response.
pub async fn propagate_request_id(mut req: Request, next: Next) -> Response {
    let inbound = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let request_id = RequestId::begin(inbound);
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Validate the bearer token and expose its subject to the handler.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let result = bearer_subject(&state, &req);
    match result {
        Ok(subject) => {
            req.extensions_mut().insert(Subject(subject));
            Ok(next.run(req).await)
        }
        Err(err) => {
            let request_id = req.extensions().get::<RequestId>().cloned();
            warn!(
                request_id = request_id.as_ref().map(RequestId::as_str),
                error = %err,
                "request rejected: unauthenticated"
            );
            Err(err.into())
        }
    }
}

fn bearer_subject(state: &AppState, req: &Request) -> Result<String, AuthError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::Missing)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError::Invalid("malformed authorization header".into()))?;
    state.tokens.validate(token)
}

/// Admit or reject the request against the caller's rate bucket.
pub async fn enforce_rate_limit(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let key = limiter::resolve_key(peer);

    if !state.limiter.allow(&key) {
        let request_id = req.extensions().get::<RequestId>().cloned();
        warn!(
            request_id = request_id.as_ref().map(RequestId::as_str),
            key = %key,
            "request rejected: rate limit exceeded"
        );
        return Err(ApiError::rate_limited());
    }

    Ok(next.run(req).await)
}
