//! Runtime configuration loaded from the process environment.
//!
//! Secrets:
//! - `TELEGRAM_TOKEN`, `CHAT_ID` — optional; delivery is skipped without them.
//!
//! Tuning:
//! - `SENTINEL_HTTP_TIMEOUT_SECS` (default 10)
//! - `SENTINEL_MAX_RETRIES` (default 2)
//! - `SENTINEL_RETRY_BASE_MS` (default 500)

use crate::infrastructure::retry::RetryPolicy;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SentinelConfig {
    pub telegram_token: Option<String>,
    pub chat_id: Option<String>,
    pub retry: RetryPolicy,
}

impl SentinelConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Lets tests avoid mutating the real environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetryPolicy::default();
        let timeout_secs = parse_or(&lookup, "SENTINEL_HTTP_TIMEOUT_SECS", defaults.timeout.as_secs());
        let max_retries = parse_or(&lookup, "SENTINEL_MAX_RETRIES", defaults.max_retries);
        let base_ms = parse_or(
            &lookup,
            "SENTINEL_RETRY_BASE_MS",
            defaults.base_delay.as_millis() as u64,
        );

        Self {
            telegram_token: lookup("TELEGRAM_TOKEN").filter(|s| !s.trim().is_empty()),
            chat_id: lookup("CHAT_ID").filter(|s| !s.trim().is_empty()),
            retry: RetryPolicy {
                max_retries,
                base_delay: Duration::from_millis(base_ms),
                timeout: Duration::from_secs(timeout_secs.max(1)),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, %default, "Invalid value, using default");
            default
        }),
    }
}
