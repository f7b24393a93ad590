//! Axum router and handlers for the gateway.
//!
//! `build_router` is the single entry point; `App::run` attaches the
//! tracing layer afterwards so tests can drive the bare router in-process.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::context::RequestId;
use crate::domain::OrderRequest;

use super::dto::{HealthOut, OrderIn, OrderOut, ReadyOut, TokenOut};
use super::error::ApiError;
use super::middleware::{enforce_rate_limit, propagate_request_id, require_bearer, Subject};

/// Build the complete application router wired to the given shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    // route_layer stacking: the auth layer is added last so it wraps the
    // rate-limit layer - auth runs first, then rate limiting, then the
    // handler body.
    let protected = Router::new()
        .route("/orders", post(create_order))
        .route_layer(from_fn_with_state(state.clone(), enforce_rate_limit))
        .route_layer(from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/login", post(login))
        .merge(protected)
        .layer(axum::middleware::from_fn(propagate_request_id))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthOut> {
    Json(HealthOut {
        status: "healthy",
        env: state.config.environment.to_string(),
    })
}

async fn ready(State(state): State<Arc<AppState>>) -> Result<Json<ReadyOut>, ApiError> {
    let missing = state.config.missing_required();
    if missing.is_empty() {
        Ok(Json(ReadyOut { status: "ready" }))
    } else {
        Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            format!(
                "service not ready: missing configuration for {}",
                missing.join(", ")
            ),
        ))
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<OrderIn>, JsonRejection>,
) -> Result<Json<TokenOut>, ApiError> {
    let Json(body) = payload.map_err(body_rejection)?;
    let form = OrderRequest::try_new(body.user_id, body.amount).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "login rejected: invalid body");
        ApiError::from(e)
    })?;

    let access_token = state.tokens.issue(form.user_id()).map_err(|e| {
        error!(request_id = %request_id, user_id = form.user_id(), error = %e, "token issue failed");
        ApiError::internal()
    })?;

    info!(user_id = form.user_id(), "token issued");
    Ok(Json(TokenOut {
        access_token,
        token_type: "bearer",
    }))
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Extension(Subject(subject)): Extension<Subject>,
    payload: Result<Json<OrderIn>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(body_rejection)?;
    let order = OrderRequest::try_new(body.user_id, body.amount).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "order rejected: invalid body");
        ApiError::from(e)
    })?;

    let requested_at = Utc::now().to_rfc3339();
    let submission = state.pipeline.submit(&order, &subject).await.map_err(|e| {
        error!(request_id = %request_id, user_id = %subject, error = %e, "order submission failed");
        ApiError::from(e)
    })?;

    info!(
        request_id = %request_id,
        order_id = %submission.order_id,
        user_id = %subject,
        amount = order.amount(),
        "order accepted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(OrderOut {
            order_id: submission.order_id.to_string(),
            poll_url: submission.handle.url().to_owned(),
            status: "PENDING",
            requested_at,
        }),
    ))
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "request body undecodable");
    ApiError::validation(rejection.body_text())
}
