//! Queue sink port.

use async_trait::async_trait;

use crate::error::SinkError;

/// A message to be published to the queue.
///
/// `group_key` preserves relative ordering of messages sharing it (per-user
/// ordering without serializing unrelated users); `dedup_key` lets the
/// queue suppress duplicate publications of the same message within its
/// dedup window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: String,
    pub group_key: String,
    pub dedup_key: String,
}

/// Sink for publishing messages to a queue destination.
#[async_trait]
pub trait QueueSink: Send + Sync {
    /// Publish `message` to `destination`. Once this returns the message
    /// is owned by the queue; the gateway keeps no copy.
    async fn publish(&self, destination: &str, message: &QueueMessage) -> Result<(), SinkError>;
}
