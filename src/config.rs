use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com/";
pub const DEFAULT_CLIENT_ID: &str = "agent";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_RESULTS: usize = 6;

/// Retry and timeout settings for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Budget for each individual HTTP call.
    pub timeout: Duration,
    pub backoff_base: Duration,
    pub backoff_floor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            backoff_base: Duration::from_secs(1),
            backoff_floor: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failed attempt `attempt` (0-indexed):
    /// `base * 2^attempt + floor`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.backoff_base.saturating_mul(factor) + self.backoff_floor
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub client_id: String,
    pub retry: RetryPolicy,
    pub default_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            retry: RetryPolicy::default(),
            default_results: DEFAULT_RESULTS,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup. Missing or malformed
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let max_attempts = parse_or_default(&lookup, "GLEAN_MAX_RETRIES", DEFAULT_MAX_RETRIES);
        let timeout_secs = parse_or_default(&lookup, "GLEAN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        Config {
            endpoint: get_or_default(&lookup, "GLEAN_ENDPOINT", &defaults.endpoint),
            client_id: get_or_default(&lookup, "GLEAN_CLIENT_ID", &defaults.client_id),
            retry: RetryPolicy {
                max_attempts,
                timeout: Duration::from_secs(timeout_secs),
                ..defaults.retry
            },
            default_results: parse_or_default(&lookup, "GLEAN_DEFAULT_RESULTS", DEFAULT_RESULTS),
        }
    }
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            log::warn!("ignoring invalid value for {key}: '{raw}' ({e}), using {default}");
            default
        }
    }
}
