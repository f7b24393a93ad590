//! Order Submission Pipeline.
//!
//! Turns a validated order into a queue publication plus a time-bounded
//! polling handle. The protocol is linear - id, configuration check,
//! publish, mint handle - with no retries and no local persistence;
//! durability is delegated entirely to the queue and the downstream
//! writer. A successful publish followed by a handle failure is an
//! accepted at-least-once-enqueue / best-effort-handle tradeoff.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::domain::{OrderId, OrderRecord, OrderRequest, PollingHandle};
use crate::error::{SinkError, SubmissionError};
use crate::port::{QueueMessage, QueueSink, StatusStore};

/// Polling handles are valid for a fixed 300 seconds, independent of
/// identity-token lifetime.
const POLL_URL_TTL: Duration = Duration::from_secs(300);

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub order_id: OrderId,
    pub handle: PollingHandle,
}

/// The two-step order acceptance protocol over injected collaborators.
pub struct OrderPipeline {
    queue: Arc<dyn QueueSink>,
    store: Arc<dyn StatusStore>,
    queue_url: Option<String>,
    store_table: Option<String>,
}

impl OrderPipeline {
    /// Wire the pipeline to its collaborators and destinations.
    pub fn new(
        queue: Arc<dyn QueueSink>,
        store: Arc<dyn StatusStore>,
        queue_url: Option<String>,
        store_table: Option<String>,
    ) -> Self {
        Self {
            queue,
            store,
            queue_url,
            store_table,
        }
    }

    /// Submit an order on behalf of the authenticated `subject`.
    ///
    /// Missing destination configuration fails before any network call;
    /// neither misconfiguration is retriable by the caller. Publish and
    /// mint failures are classified, never retried here - retry policy
    /// belongs to the caller, and a resubmission gets a fresh order id.
    pub async fn submit(
        &self,
        order: &OrderRequest,
        subject: &str,
    ) -> Result<Submission, SubmissionError> {
        let order_id = OrderId::generate();

        let queue_url = self
            .queue_url
            .as_deref()
            .ok_or(SubmissionError::NotConfigured("queue_url"))?;
        let store_table = self
            .store_table
            .as_deref()
            .ok_or(SubmissionError::NotConfigured("store_table"))?;

        let record = OrderRecord {
            order_id: order_id.clone(),
            user_id: subject.to_owned(),
            amount: order.amount(),
        };
        let body =
            serde_json::to_string(&record).map_err(|e| SubmissionError::Internal(e.to_string()))?;

        let message = QueueMessage {
            body,
            group_key: subject.to_owned(),
            dedup_key: order_id.to_string(),
        };
        self.queue
            .publish(queue_url, &message)
            .await
            .map_err(|e| {
                error!(order_id = %order_id, error = %e, "queue publish failed");
                match e {
                    SinkError::Unavailable(m) => SubmissionError::QueueUnavailable(m),
                    SinkError::Other(m) => SubmissionError::Internal(m),
                }
            })?;
        info!(
            order_id = %order_id,
            user_id = subject,
            amount = order.amount(),
            "order published"
        );

        let url = self
            .store
            .mint_polling_handle(store_table, order_id.as_str(), POLL_URL_TTL)
            .await
            .map_err(|e| {
                error!(order_id = %order_id, error = %e, "polling handle mint failed");
                match e {
                    SinkError::Unavailable(m) => SubmissionError::StoreUnavailable(m),
                    SinkError::Other(m) => SubmissionError::Internal(m),
                }
            })?;

        Ok(Submission {
            order_id,
            handle: PollingHandle::new(url, POLL_URL_TTL),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{RecordingQueue, StaticStore};

    fn order() -> OrderRequest {
        OrderRequest::try_new("u123", 500).expect("valid order")
    }

    fn pipeline(
        queue: Arc<RecordingQueue>,
        store: Arc<StaticStore>,
        queue_url: Option<&str>,
        store_table: Option<&str>,
    ) -> OrderPipeline {
        OrderPipeline::new(
            queue,
            store,
            queue_url.map(str::to_owned),
            store_table.map(str::to_owned),
        )
    }

    #[tokio::test]
    async fn publishes_once_with_group_and_dedup_keys() {
        let queue = Arc::new(RecordingQueue::new());
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue.clone(), store, Some("https://q/orders"), Some("orders"));

        let submission = pipeline.submit(&order(), "u123").await.expect("submits");

        let published = queue.published();
        assert_eq!(published.len(), 1);
        let (destination, message) = &published[0];
        assert_eq!(destination, "https://q/orders");
        assert_eq!(message.group_key, "u123");
        assert_eq!(message.dedup_key, submission.order_id.to_string());

        let body: serde_json::Value = serde_json::from_str(&message.body).expect("json body");
        assert_eq!(body["user_id"], "u123");
        assert_eq!(body["amount"], 500);
        assert_eq!(body["order_id"], submission.order_id.as_str());

        assert_eq!(submission.handle.url(), "http://signed.example/poll");
        assert_eq!(submission.handle.expires_in(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn order_ids_are_unique_per_submission() {
        let queue = Arc::new(RecordingQueue::new());
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue, store, Some("https://q/orders"), Some("orders"));

        let a = pipeline.submit(&order(), "u123").await.expect("submits");
        let b = pipeline.submit(&order(), "u123").await.expect("submits");
        assert_ne!(a.order_id, b.order_id);
    }

    #[tokio::test]
    async fn missing_queue_url_fails_before_any_call() {
        let queue = Arc::new(RecordingQueue::new());
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue.clone(), store.clone(), None, Some("orders"));

        let err = pipeline.submit(&order(), "u123").await.unwrap_err();
        assert!(matches!(err, SubmissionError::NotConfigured("queue_url")));
        assert_eq!(queue.publish_count(), 0);
        assert_eq!(store.mint_count(), 0);
    }

    #[tokio::test]
    async fn missing_store_table_fails_before_publish() {
        let queue = Arc::new(RecordingQueue::new());
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue.clone(), store, Some("https://q/orders"), None);

        let err = pipeline.submit(&order(), "u123").await.unwrap_err();
        assert!(matches!(err, SubmissionError::NotConfigured("store_table")));
        assert_eq!(queue.publish_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_classifies_as_queue_unavailable() {
        let queue = Arc::new(RecordingQueue::failing(SinkError::Unavailable(
            "connection refused".into(),
        )));
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue, store.clone(), Some("https://q/orders"), Some("orders"));

        let err = pipeline.submit(&order(), "u123").await.unwrap_err();
        assert!(matches!(err, SubmissionError::QueueUnavailable(_)));
        assert_eq!(store.mint_count(), 0);
    }

    #[tokio::test]
    async fn unexpected_publish_failure_classifies_as_internal() {
        let queue = Arc::new(RecordingQueue::failing(SinkError::Other("boom".into())));
        let store = Arc::new(StaticStore::new("http://signed.example/poll"));
        let pipeline = pipeline(queue, store, Some("https://q/orders"), Some("orders"));

        let err = pipeline.submit(&order(), "u123").await.unwrap_err();
        assert!(matches!(err, SubmissionError::Internal(_)));
    }

    #[tokio::test]
    async fn store_failure_after_publish_is_store_unavailable() {
        let queue = Arc::new(RecordingQueue::new());
        let store = Arc::new(StaticStore::failing(SinkError::Unavailable(
            "store down".into(),
        )));
        let pipeline = pipeline(queue.clone(), store, Some("https://q/orders"), Some("orders"));

        let err = pipeline.submit(&order(), "u123").await.unwrap_err();
        assert!(matches!(err, SubmissionError::StoreUnavailable(_)));
        // The publish already happened: accepted at-least-once tradeoff.
        assert_eq!(queue.publish_count(), 1);
    }
}
