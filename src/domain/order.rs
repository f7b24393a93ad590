//! Order types: the validated inbound request, the published record, and
//! the polling handle returned to the caller.

use std::time::Duration;

use serde::Serialize;

use super::error::ValidationError;
use super::ids::OrderId;

/// Maximum accepted `user_id` length, in characters.
pub const USER_ID_MAX_LEN: usize = 50;

/// A validated order submission.
///
/// Fields are private; construction goes through [`OrderRequest::try_new`]
/// which enforces the order invariants, so a value of this type is always
/// well-formed. Exists only within a single request's processing.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    user_id: String,
    amount: i64,
}

impl OrderRequest {
    /// Validate and construct an order request.
    ///
    /// `user_id` must be 1 to [`USER_ID_MAX_LEN`] characters and `amount`
    /// strictly positive.
    pub fn try_new(user_id: impl Into<String>, amount: i64) -> Result<Self, ValidationError> {
        let user_id = user_id.into();
        let len = user_id.chars().count();
        if len == 0 || len > USER_ID_MAX_LEN {
            return Err(ValidationError::UserIdLength { len });
        }
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount { amount });
        }
        Ok(Self { user_id, amount })
    }

    /// Get the user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Get the order amount.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }
}

/// The order record as published to the queue.
///
/// Ownership transfers to the queue at publish time; the gateway keeps no
/// copy. `user_id` is the authenticated subject, not necessarily the
/// `user_id` carried in the request body.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub user_id: String,
    pub amount: i64,
}

/// A time-bounded, signed reference to an order's future status record.
///
/// Does not guarantee the referenced record exists yet; downstream
/// processing is asynchronous.
#[derive(Debug, Clone)]
pub struct PollingHandle {
    url: String,
    expires_in: Duration,
}

impl PollingHandle {
    /// Wrap a minted status URL with its validity window.
    #[must_use]
    pub fn new(url: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            url: url.into(),
            expires_in,
        }
    }

    /// The signed polling URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validity window of the handle.
    #[must_use]
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }
}
