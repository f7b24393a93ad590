//! Validation errors for order input.
//!
//! Returned by `try_new` constructors that enforce the order invariants;
//! the HTTP adapter translates them to 422 responses.

use thiserror::Error;

use super::order::USER_ID_MAX_LEN;

/// Errors raised when an order request violates its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `user_id` must be between 1 and [`USER_ID_MAX_LEN`] characters.
    #[error("user_id must be between 1 and {max} characters, got {len}", max = USER_ID_MAX_LEN)]
    UserIdLength {
        /// Character count of the rejected value.
        len: usize,
    },

    /// `amount` must be a strictly positive integer.
    #[error("amount must be a positive integer, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: i64,
    },
}
