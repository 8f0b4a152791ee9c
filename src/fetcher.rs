use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::RetryPolicy;
use crate::data_models::RawResponse;

const USER_AGENT: &str = concat!("glean/", env!("CARGO_PKG_VERSION"));

/// Why a single attempt failed. Every variant is considered transient.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad upstream {0}")]
    Upstream(StatusCode),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// All attempts failed; only the last cause is kept.
    #[error("netfail after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: AttemptError,
    },

    #[error("netfail: retry budget is zero, no request was sent")]
    NoAttempts,
}

/// Receives one notification per failed attempt.
pub trait RetryObserver: Send + Sync {
    /// `attempt` is 0-indexed. `next_delay` is `None` when no attempt follows.
    fn on_attempt_failed(
        &self,
        attempt: u32,
        max_attempts: u32,
        cause: &AttemptError,
        next_delay: Option<Duration>,
    );
}

/// Writes failed attempts to the log as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRetryObserver;

impl RetryObserver for LogRetryObserver {
    fn on_attempt_failed(
        &self,
        attempt: u32,
        max_attempts: u32,
        cause: &AttemptError,
        next_delay: Option<Duration>,
    ) {
        match next_delay {
            Some(delay) => log::warn!(
                "retry {}/{} in {:.1}s: {}",
                attempt + 1,
                max_attempts,
                delay.as_secs_f64(),
                cause
            ),
            None => log::warn!("attempt {}/{} failed: {}", attempt + 1, max_attempts, cause),
        }
    }
}

pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
    observer: Arc<dyn RetryObserver>,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy) -> Result<Fetcher> {
        Self::with_observer(policy, Arc::new(LogRetryObserver))
    }

    pub fn with_observer(policy: RetryPolicy, observer: Arc<dyn RetryObserver>) -> Result<Fetcher> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Fetcher {
            client,
            policy,
            observer,
        })
    }

    /// GETs `endpoint` with the URL-encoded `params`, retrying transport errors,
    /// 5xx statuses and undecodable bodies with exponential backoff.
    pub async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<RawResponse, FetchError> {
        let max_attempts = self.policy.max_attempts;
        let mut last = None;

        for attempt in 0..max_attempts {
            match self.attempt(endpoint, params).await {
                Ok(raw) => {
                    if attempt > 0 {
                        log::debug!("fetch succeeded on attempt {}/{}", attempt + 1, max_attempts);
                    }
                    return Ok(raw);
                }
                Err(cause) => {
                    let next_delay =
                        (attempt + 1 < max_attempts).then(|| self.policy.delay_after(attempt));
                    self.observer
                        .on_attempt_failed(attempt, max_attempts, &cause, next_delay);
                    last = Some(cause);
                    if let Some(delay) = next_delay {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        match last {
            Some(last) => Err(FetchError::Exhausted {
                attempts: max_attempts,
                last,
            }),
            None => Err(FetchError::NoAttempts),
        }
    }

    async fn attempt(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<RawResponse, AttemptError> {
        let response = self
            .client
            .get(endpoint)
            .query(params)
            .timeout(self.policy.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AttemptError::Upstream(status));
        }
        if !status.is_success() {
            log::debug!("upstream answered {status}, decoding body as-is");
        }

        let body = response.bytes().await?;
        let fields: Map<String, Value> = serde_json::from_slice(&body)?;
        Ok(RawResponse::new(fields))
    }
}
