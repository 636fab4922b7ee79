//!
//! Resilient HTTP request layer.
//!
//! [`NetworkClient::fetch_with_retry`] performs a request up to the
//! configured number of attempts, classifying failures into
//! [`NetworkError`] variants. Rate-limit (429) and authentication (401/403)
//! responses propagate immediately; other failures back off exponentially
//! (`2^attempt` seconds, no jitter) before the next attempt. When every
//! attempt has failed, the last error encountered is the one surfaced.

use std::time::Duration;

use reqwest::{
    Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, warn};

use crate::{Result, config::ConfigStore};

pub mod errors;

pub use errors::NetworkError;

/// Per-request options layered on top of the configured defaults.
///
/// Caller-supplied headers are applied after the defaults and may override
/// them, the bearer credential header included.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// HTTP client with retry, backoff, and typed failure classification.
///
/// Reads the retry policy and bearer credential from the shared
/// [`ConfigStore`] at request time, so a client built before `configure()`
/// works once configuration arrives.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    config: ConfigStore,
}

impl NetworkClient {
    /// Create a client reading policy and credentials from `config`.
    pub fn new(config: ConfigStore) -> Self {
        Self { config }
    }

    /// Perform a request, retrying per the configured policy.
    ///
    /// Returns the first successful [`reqwest::Response`], or the error from
    /// the last attempt once the policy is exhausted.
    pub async fn fetch_with_retry(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response> {
        let policy = self.config.network()?;
        let api_key = self.config.api_key()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(policy.timeout_ms))
            .build()
            .map_err(|e| NetworkError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                NetworkError::Transport {
                    url: url.to_string(),
                    reason: format!("invalid bearer header: {e}"),
                }
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Caller headers win, bearer included.
        for (name, value) in &options.headers {
            headers.insert(name, value.clone());
        }

        let mut last_error: crate::Error = NetworkError::Transport {
            url: url.to_string(),
            reason: "unknown network error".to_string(),
        }
        .into();

        for attempt in 0..policy.max_retries {
            let mut request = client
                .request(options.method.clone(), url)
                .headers(headers.clone());
            if let Some(body) = &options.body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        return Err(NetworkError::RateLimitExceeded {
                            url: url.to_string(),
                        }
                        .into());
                    }

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(NetworkError::AuthenticationFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        }
                        .into());
                    }

                    if status.is_success() {
                        return Ok(response);
                    }

                    last_error = NetworkError::Http {
                        status: status.as_u16(),
                        url: url.to_string(),
                    }
                    .into();
                }
                Err(e) => {
                    last_error = NetworkError::Transport {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                    .into();
                }
            }

            // Exponential backoff: wait 1s, 2s, 4s...
            if attempt + 1 < policy.max_retries {
                let delay =
                    Duration::from_millis(2u64.saturating_pow(attempt).saturating_mul(1000));
                debug!(
                    url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "request failed, backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            url,
            attempts = policy.max_retries,
            "request failed after exhausting retries"
        );
        Err(last_error)
    }
}
