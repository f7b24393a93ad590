//! Trait definitions for the gateway's outbound collaborators.
//!
//! The queue and status store are opaque services; these narrow interfaces
//! are what the order pipeline depends on, with implementations injected
//! at startup (see `adapter`) and substitutable fakes in `testkit`.

mod queue;
mod store;

pub use queue::{QueueMessage, QueueSink};
pub use store::StatusStore;
