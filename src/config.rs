//! Application configuration loading and validation.
//!
//! Configuration is read from a TOML file with `ORDERGATE_*` environment
//! variable overrides for deploy-time and sensitive values (secrets are
//! expected from the environment, never committed to a config file). A
//! missing file is not an error: the gateway can run from defaults plus
//! environment alone.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};
use crate::limiter::RateSpec;

/// Deployment environment, reported by `/health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::InvalidValue {
                field: "environment",
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                tracing_fmt().json().with_env_filter(filter).init();
            }
            _ => {
                tracing_fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Identity token signing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric signing secret. Override via `ORDERGATE_JWT_SECRET`.
    pub secret: String,
    /// Signing algorithm name, e.g. "HS256".
    pub algorithm: String,
    /// Token lifetime in minutes.
    pub expires_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-prod".into(),
            algorithm: "HS256".into(),
            expires_minutes: 60,
        }
    }
}

/// Queue destination. Submissions fail with 503 until `url` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub url: Option<String>,
}

/// Status store used to mint polling URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL the polling URLs are rooted at.
    pub base_url: String,
    /// Status table name. Submissions fail with 503 until set.
    pub table: Option<String>,
    /// Secret used to sign polling URLs. Override via
    /// `ORDERGATE_STORE_SIGNING_SECRET`.
    pub signing_secret: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4566".into(),
            table: None,
            signing_secret: "change-me-in-prod".into(),
        }
    }
}

/// Per-caller rate limiting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Spec string of the form "N/unit", e.g. "100/minute".
    pub per_caller: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_caller: "100/minute".into(),
        }
    }
}

/// Main application configuration. Read-only after startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub queue: QueueConfig,
    pub store: StoreConfig,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load configuration from a TOML file, apply environment overrides,
    /// and validate. An absent file yields defaults plus environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Names of required destinations that are not configured, using the
    /// keys `/ready` reports and `SubmissionError::NotConfigured` carries.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.queue.url.is_none() {
            missing.push("queue_url");
        }
        if self.store.table.is_none() {
            missing.push("store_table");
        }
        missing
    }

    /// Parse the configured rate-limit spec.
    pub fn rate_spec(&self) -> std::result::Result<RateSpec, ConfigError> {
        RateSpec::parse(&self.rate_limit.per_caller)
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(v) = lookup("ORDERGATE_ENVIRONMENT") {
            self.environment = v.parse()?;
        }
        if let Some(v) = lookup("ORDERGATE_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = lookup("ORDERGATE_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("ORDERGATE_JWT_SECRET") {
            self.auth.secret = v;
        }
        if let Some(v) = lookup("ORDERGATE_JWT_EXPIRES_MINUTES") {
            self.auth.expires_minutes =
                v.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "auth.expires_minutes",
                    reason: format!("not an integer: '{v}'"),
                })?;
        }
        if let Some(v) = lookup("ORDERGATE_QUEUE_URL") {
            self.queue.url = Some(v);
        }
        if let Some(v) = lookup("ORDERGATE_STORE_BASE_URL") {
            self.store.base_url = v;
        }
        if let Some(v) = lookup("ORDERGATE_STORE_TABLE") {
            self.store.table = Some(v);
        }
        if let Some(v) = lookup("ORDERGATE_STORE_SIGNING_SECRET") {
            self.store.signing_secret = v;
        }
        if let Some(v) = lookup("ORDERGATE_RATE_LIMIT") {
            self.rate_limit.per_caller = v;
        }
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.auth.secret.is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.secret",
            });
        }
        jsonwebtoken::Algorithm::from_str(&self.auth.algorithm).map_err(|e| {
            ConfigError::InvalidValue {
                field: "auth.algorithm",
                reason: e.to_string(),
            }
        })?;
        if self.auth.expires_minutes < 1 {
            return Err(ConfigError::InvalidValue {
                field: "auth.expires_minutes",
                reason: format!("must be at least 1, got {}", self.auth.expires_minutes),
            });
        }
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "server.bind",
                reason: e.to_string(),
            })?;
        Url::parse(&self.store.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "store.base_url",
            reason: e.to_string(),
        })?;
        if self.logging.level.is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            });
        }
        self.rate_spec()?;
        Ok(())
    }
}
