//! Canonical test configurations and app-state builders.

use std::sync::Arc;

use axum::Router;

use crate::adapter::http::build_router;
use crate::app::AppState;
use crate::config::Config;
use crate::port::{QueueSink, StatusStore};

/// A fully configured gateway: queue and store destinations set, test
/// signing secret, default "100/minute" rate limit.
#[must_use]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.secret = "test-secret".into();
    config.queue.url = Some("https://queue.example.com/test-queue".into());
    config.store.table = Some("test-table".into());
    config
}

/// A gateway with neither queue nor store destination configured.
#[must_use]
pub fn unconfigured_config() -> Config {
    let mut config = Config::default();
    config.auth.secret = "test-secret".into();
    config
}

/// Build shared state over the given fakes.
pub fn test_state(
    config: Config,
    queue: Arc<dyn QueueSink>,
    store: Arc<dyn StatusStore>,
) -> Arc<AppState> {
    Arc::new(AppState::new(config, queue, store).expect("test config is valid"))
}

/// Build the bare router over the given fakes, ready for oneshot calls.
pub fn test_router(
    config: Config,
    queue: Arc<dyn QueueSink>,
    store: Arc<dyn StatusStore>,
) -> Router {
    build_router(test_state(config, queue, store))
}
