//! Application layer - shared state, the order pipeline, and the server
//! run loop.

mod pipeline;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::adapter::http::build_router;
use crate::adapter::{HttpQueue, SignedUrlStore};
use crate::config::Config;
use crate::error::{ConfigError, Result};

pub use pipeline::{OrderPipeline, Submission};
pub use state::AppState;

/// Main application: wires collaborators and serves the HTTP surface.
pub struct App;

impl App {
    /// Run the gateway until the server exits.
    pub async fn run(config: Config) -> Result<()> {
        for key in config.missing_required() {
            warn!(key, "destination not configured; submissions will fail until it is set");
        }

        let bind: SocketAddr =
            config
                .server
                .bind
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                    field: "server.bind",
                    reason: e.to_string(),
                })?;

        let queue = Arc::new(HttpQueue::new()?);
        let store = Arc::new(SignedUrlStore::new(
            &config.store.base_url,
            config.store.signing_secret.clone(),
        )?);

        let environment = config.environment;
        let state = Arc::new(AppState::new(config, queue, store)?);
        let router = build_router(state).layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(bind).await?;
        info!(addr = %bind, env = %environment, "ordergate listening");

        // ConnectInfo carries the peer address the rate limiter keys on.
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}
