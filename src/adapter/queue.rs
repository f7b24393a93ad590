//! HTTP-backed queue sink.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, SinkError};
use crate::port::{QueueMessage, QueueSink};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Serialize)]
struct PublishRequest<'a> {
    body: &'a str,
    group_key: &'a str,
    dedup_key: &'a str,
}

/// Publishes messages to the queue service over HTTP.
///
/// Transport failures and server-side (5xx) responses classify as
/// `Unavailable`; anything else unexpected as `Other`. The request timeout
/// here is the only deadline the gateway imposes on a publish.
pub struct HttpQueue {
    client: reqwest::Client,
}

impl HttpQueue {
    /// Build the queue client.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl QueueSink for HttpQueue {
    async fn publish(&self, destination: &str, message: &QueueMessage) -> Result<(), SinkError> {
        let request = PublishRequest {
            body: &message.body,
            group_key: &message.group_key,
            dedup_key: &message.dedup_key,
        };

        let response = self
            .client
            .post(destination)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    SinkError::Other(e.to_string())
                } else {
                    SinkError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(destination, dedup_key = %message.dedup_key, "message published");
            Ok(())
        } else if status.is_server_error() {
            Err(SinkError::Unavailable(format!("queue returned {status}")))
        } else {
            Err(SinkError::Other(format!("queue returned {status}")))
        }
    }
}
