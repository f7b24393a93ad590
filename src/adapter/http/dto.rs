//! Request/response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Inbound order shape. `/login` reuses it as its form body.
#[derive(Debug, Deserialize)]
pub struct OrderIn {
    pub user_id: String,
    pub amount: i64,
}

/// 202 response for an accepted order.
#[derive(Debug, Serialize)]
pub struct OrderOut {
    pub order_id: String,
    pub poll_url: String,
    /// Always "PENDING" at acceptance; downstream processing is async.
    pub status: &'static str,
    /// ISO-8601 UTC acceptance timestamp.
    pub requested_at: String,
}

/// Bearer token response for `/login`.
#[derive(Debug, Serialize)]
pub struct TokenOut {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub env: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyOut {
    pub status: &'static str,
}

/// Uniform failure body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
