//! Fakes for the outbound ports.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::SinkError;
use crate::port::{QueueMessage, QueueSink, StatusStore};

/// Queue fake that records every publish, optionally scripted to fail.
#[derive(Default)]
pub struct RecordingQueue {
    published: Mutex<Vec<(String, QueueMessage)>>,
    fail_with: Option<SinkError>,
}

impl RecordingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose every publish fails with `error`.
    #[must_use]
    pub fn failing(error: SinkError) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    /// Snapshot of `(destination, message)` pairs published so far.
    #[must_use]
    pub fn published(&self) -> Vec<(String, QueueMessage)> {
        self.published.lock().clone()
    }

    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.published.lock().len()
    }
}

#[async_trait]
impl QueueSink for RecordingQueue {
    async fn publish(&self, destination: &str, message: &QueueMessage) -> Result<(), SinkError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.published
            .lock()
            .push((destination.to_owned(), message.clone()));
        Ok(())
    }
}

/// Store fake that mints a fixed URL, optionally scripted to fail.
pub struct StaticStore {
    url: String,
    minted: Mutex<usize>,
    fail_with: Option<SinkError>,
}

impl StaticStore {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            minted: Mutex::new(0),
            fail_with: None,
        }
    }

    /// A store whose every mint fails with `error`.
    #[must_use]
    pub fn failing(error: SinkError) -> Self {
        Self {
            url: String::new(),
            minted: Mutex::new(0),
            fail_with: Some(error),
        }
    }

    #[must_use]
    pub fn mint_count(&self) -> usize {
        *self.minted.lock()
    }
}

#[async_trait]
impl StatusStore for StaticStore {
    async fn mint_polling_handle(
        &self,
        _table: &str,
        _key: &str,
        _ttl: Duration,
    ) -> Result<String, SinkError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        *self.minted.lock() += 1;
        Ok(self.url.clone())
    }
}
