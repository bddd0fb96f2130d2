//! reqwest-backed [`Transport`] implementation.

use crate::config::Config;
use crate::error::SdkError;
use crate::transport::Transport;
use async_trait::async_trait;
use core::time::Duration;
use serde::Deserialize;
use serde_json::Value;

/// Envelope returned by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

/// HTTP client for the service API.
///
/// Attaches the bearer `Authorization` header, bounds every call with the
/// configured timeout, resolves the response envelope, and translates all
/// failures into [`SdkError`]. GET requests are additionally retried per the
/// configured [`RetryPolicy`](crate::RetryPolicy); POST requests are never
/// retried because task creation is not idempotent.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: Config,
}

impl HttpClient {
    /// Creates a client over a normalized configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url(), path)
        }
    }

    async fn send_once(
        &self,
        method: &'static str,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, SdkError> {
        let mut request = match method {
            "GET" => self.http.get(url),
            _ => self.http.post(url),
        };
        request = request
            .timeout(self.config.timeout())
            .bearer_auth(self.config.api_key());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method, url, "sending api request");

        let timeout = self.config.timeout();
        let response = request
            .send()
            .await
            .map_err(|err| classify(method, url, timeout, err))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| classify(method, url, timeout, err))?;

        if !status.is_success() {
            // Prefer the envelope message when the error body carries one.
            let message = serde_json::from_str::<Envelope>(&text)
                .ok()
                .map(|envelope| envelope.msg)
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(SdkError::HttpFailure {
                method,
                url: url.to_string(),
                code: i64::from(status.as_u16()),
                message,
            });
        }

        let envelope: Envelope =
            serde_json::from_str(&text).map_err(|err| SdkError::Network {
                method,
                url: url.to_string(),
                message: format!("invalid response body: {err}"),
                source: Some(Box::new(err)),
            })?;

        if envelope.code != 200 {
            return Err(SdkError::HttpFailure {
                method,
                url: url.to_string(),
                code: envelope.code,
                message: envelope.msg,
            });
        }

        Ok(envelope.data)
    }

    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, SdkError> {
        let retry = self.config.retry();
        let mut delay = retry.retry_delay;
        let mut attempt = 0u32;
        loop {
            match self.send_once("GET", url, query, None).await {
                Ok(data) => return Ok(data),
                Err(err) if attempt < retry.max_retries && is_retryable(&err) => {
                    attempt += 1;
                    tracing::debug!(url, attempt, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    if retry.exponential_backoff {
                        delay *= 2;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SdkError> {
        let url = self.url_for(path);
        self.get_with_retry(&url, query).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, SdkError> {
        let url = self.url_for(path);
        self.send_once("POST", &url, &[], Some(&body)).await
    }
}

impl core::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn classify(method: &'static str, url: &str, timeout: Duration, err: reqwest::Error) -> SdkError {
    if err.is_timeout() {
        SdkError::Timeout {
            limit: timeout,
            operation: format!("{method} {url}"),
        }
    } else {
        SdkError::Network {
            method,
            url: url.to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

fn is_retryable(err: &SdkError) -> bool {
    match err {
        SdkError::Network { .. } | SdkError::Timeout { .. } => true,
        SdkError::HttpFailure { code, .. } => matches!(*code, 500..=599),
        _ => false,
    }
}
