//! Signed-URL status store.
//!
//! Polling URLs are minted locally: the URL for a status record is the
//! store's base URL plus `{table}/{key}`, with an expiry instant and an
//! HMAC-SHA256 signature over `table:key:expires` appended as query
//! parameters. The downstream status service verifies the signature with
//! the shared secret before serving the record.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, SinkError};
use crate::port::StatusStore;

type HmacSha256 = Hmac<Sha256>;

/// Mints signed, expiring polling URLs rooted at a base URL.
pub struct SignedUrlStore {
    base_url: Url,
    secret: String,
}

impl SignedUrlStore {
    /// Build the store from its base URL and signing secret.
    pub fn new(base_url: &str, secret: impl Into<String>) -> Result<Self, ConfigError> {
        // A trailing slash keeps Url::join from replacing the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidValue {
            field: "store.base_url",
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            secret: secret.into(),
        })
    }
}

#[async_trait]
impl StatusStore for SignedUrlStore {
    async fn mint_polling_handle(
        &self,
        table: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, SinkError> {
        let expires = Utc::now().timestamp() + ttl.as_secs() as i64;

        let mut url = self
            .base_url
            .join(&format!("{table}/{key}"))
            .map_err(|e| SinkError::Other(e.to_string()))?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| SinkError::Other(e.to_string()))?;
        mac.update(format!("{table}:{key}:{expires}").as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);

        debug!(table, key, "polling URL minted");
        Ok(url.into())
    }
}
