//! Shared application state.
//!
//! One read-only configuration snapshot plus the request-pipeline
//! components, shared across handlers as `Arc<AppState>`. The rate
//! limiter's per-key windows are the only cross-request mutable state.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::error::Result;
use crate::limiter::RateLimiter;
use crate::port::{QueueSink, StatusStore};

use super::pipeline::OrderPipeline;

/// State shared by all handlers and middleware.
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
    pub limiter: RateLimiter,
    pub pipeline: OrderPipeline,
}

impl AppState {
    /// Build the state from configuration and injected collaborators.
    pub fn new(
        config: Config,
        queue: Arc<dyn QueueSink>,
        store: Arc<dyn StatusStore>,
    ) -> Result<Self> {
        let tokens = TokenService::from_config(&config.auth)?;
        let limiter = RateLimiter::new(config.rate_spec()?);
        let pipeline = OrderPipeline::new(
            queue,
            store,
            config.queue.url.clone(),
            config.store.table.clone(),
        );
        Ok(Self {
            config,
            tokens,
            limiter,
            pipeline,
        })
    }
}
