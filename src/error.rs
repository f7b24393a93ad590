use thiserror::Error;

use crate::domain::error::ValidationError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Authentication failures, distinguished for logging.
///
/// At the HTTP boundary `Missing` maps to 403 and the other variants to
/// 401; no component below the HTTP adapter performs that translation.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing authorization header")]
    Missing,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token expired")]
    Expired,

    #[error("invalid token: missing subject")]
    MissingSubject,
}

/// Failures reported by outbound collaborators (queue sink, status store).
///
/// Adapters classify at the point of origin: `Unavailable` for transport
/// and service-side failures, `Other` for anything unexpected. The order
/// pipeline maps these into [`SubmissionError`].
#[derive(Error, Debug, Clone)]
pub enum SinkError {
    #[error("service unreachable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

/// Order submission failures, classified per pipeline step.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// A required destination is not configured; raised before any
    /// network call since the caller cannot retry past it.
    #[error("service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("queue service unavailable: {0}")]
    QueueUnavailable(String),

    #[error("status store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("token signing failed: {0}")]
    TokenSigning(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
