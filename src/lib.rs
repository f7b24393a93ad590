//! Ordergate - HTTP order-ingestion gateway.
//!
//! Authenticated clients submit orders which are published to a downstream
//! queue; the caller receives a `202 Accepted` with a signed, time-bounded
//! URL for polling the order's eventual status record. The gateway only
//! ingests and hands off - processing and fulfillment live downstream.
//!
//! # Architecture
//!
//! The crate is organized hexagonally: the queue and status store are
//! opaque collaborators behind narrow ports, with implementations injected
//! into the pipeline at startup so tests can substitute fakes.
//!
//! - **`port`** - `QueueSink` / `StatusStore` trait seams
//! - **`adapter`** - port implementations: the axum HTTP surface plus the
//!   HTTP queue client and the signed-URL store
//! - **`app`** - shared state, the order submission pipeline, run loop
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with `ORDERGATE_*` env overrides
//! - [`domain`] - validated order types and identifiers
//! - [`error`] - error taxonomy for the crate
//! - [`auth`] - signed, expiring identity tokens
//! - [`context`] - per-request correlation ids
//! - [`limiter`] - per-caller sliding-window rate limiting
//!
//! # Example
//!
//! ```no_run
//! use ordergate::app::App;
//! use ordergate::config::Config;
//!
//! # async fn run() -> ordergate::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! App::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod limiter;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
