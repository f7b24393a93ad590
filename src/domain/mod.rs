//! Gateway-agnostic domain types.

pub mod error;
mod ids;
mod order;

pub use ids::OrderId;
pub use order::{OrderRecord, OrderRequest, PollingHandle, USER_ID_MAX_LEN};
