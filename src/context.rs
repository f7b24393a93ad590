//! Request correlation context.
//!
//! Each inbound request gets a [`RequestId`], reused verbatim from the
//! `x-request-id` header when present, freshly generated otherwise. The id
//! lives in the request's extensions for its lifetime (see
//! `adapter::http::middleware`) and is echoed on every response under the
//! same header; there is no global, so concurrent requests never observe
//! each other's id.

use std::fmt;

use uuid::Uuid;

/// Header carrying the correlation id, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation identifier scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Begin a request scope: adopt the inbound correlation value when
    /// present and non-empty, otherwise mint a fresh identifier.
    #[must_use]
    pub fn begin(inbound: Option<&str>) -> Self {
        match inbound {
            Some(value) if !value.is_empty() => Self(value.to_owned()),
            _ => Self(Uuid::new_v4().to_string()),
        }
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
