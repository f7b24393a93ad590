//! Per-caller rate limiting.
//!
//! A sliding window of admission timestamps is kept per key. The check and
//! the window update happen under the key's lock, so admission decisions
//! for one key are sequential: within any window no key is admitted more
//! than the configured limit, regardless of request concurrency.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::ConfigError;

/// Bucket shared by all callers whose network address cannot be resolved.
pub const FALLBACK_KEY: &str = "unknown";

/// Parsed rate-limit policy: `limit` admissions per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSpec {
    pub limit: u32,
    pub window: Duration,
}

impl RateSpec {
    /// Parse a spec string of the form `"N/unit"`, e.g. `"100/minute"`.
    /// Supported units: `second`, `minute`, `hour`, `day`.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "rate_limit.per_caller",
            reason,
        };

        let (count, unit) = spec
            .split_once('/')
            .ok_or_else(|| invalid(format!("expected 'N/unit', got '{spec}'")))?;

        let limit: u32 = count
            .trim()
            .parse()
            .map_err(|_| invalid(format!("not a number: '{count}'")))?;
        if limit == 0 {
            return Err(invalid("limit must be at least 1".into()));
        }

        let window = match unit.trim() {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(60 * 60),
            "day" => Duration::from_secs(24 * 60 * 60),
            other => return Err(invalid(format!("unknown time unit: '{other}'"))),
        };

        Ok(Self { limit, window })
    }
}

/// Sliding-window rate limiter keyed by caller identity.
pub struct RateLimiter {
    spec: RateSpec,
    windows: DashMap<String, Mutex<VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter enforcing `spec` per key independently.
    #[must_use]
    pub fn new(spec: RateSpec) -> Self {
        Self {
            spec,
            windows: DashMap::new(),
        }
    }

    /// Decide admission for `key` at the current instant.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Decide admission for `key` as of `now`. Exposed so tests can step
    /// time deterministically.
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        let entry = self.windows.entry(key.to_owned()).or_default();
        let mut window = entry.lock();

        while let Some(&oldest) = window.front() {
            if now.duration_since(oldest) >= self.spec.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.spec.limit as usize {
            false
        } else {
            window.push_back(now);
            true
        }
    }
}

/// Resolve the rate-limit key for a caller: the peer IP when known,
/// otherwise [`FALLBACK_KEY`] (all such callers share one bucket).
#[must_use]
pub fn resolve_key(peer: Option<SocketAddr>) -> String {
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => FALLBACK_KEY.to_owned(),
    }
}
