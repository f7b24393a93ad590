//! Status store port.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SinkError;

/// Mints time-bounded polling URLs for status records.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Produce a signed URL referencing the record at `key` in `table`,
    /// valid for `ttl`. The record itself may not exist yet.
    async fn mint_polling_handle(
        &self,
        table: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, SinkError>;
}
