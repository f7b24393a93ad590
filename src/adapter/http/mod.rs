//! Inbound HTTP adapter: router, handlers, middleware, and the single
//! component-error-to-status translation boundary.

pub mod dto;
mod error;
mod middleware;
mod routes;

pub use error::ApiError;
pub use middleware::Subject;
pub use routes::build_router;
