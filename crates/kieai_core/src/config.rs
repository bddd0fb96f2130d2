//! Client configuration.
//!
//! A [`Config`] is assembled with builder-style methods and validated once
//! by [`Config::normalize`] when the client is constructed. After that it is
//! an immutable snapshot; every request reads the frozen values.

use crate::error::SdkError;
use core::time::Duration;
use url::Url;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.kie.ai";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry behavior for idempotent requests.
///
/// Only GET requests are retried; task creation is not idempotent and is
/// never replayed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay between attempts.
    pub retry_delay: Duration,
    /// Double the delay after each failed attempt.
    pub exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            retry_delay: Duration::ZERO,
            exponential_backoff: false,
        }
    }
}

/// Client configuration.
///
/// # Example
///
/// ```
/// use kieai_core::Config;
/// use std::time::Duration;
///
/// let config = Config::new("my-api-key")
///     .with_base_url("https://api.kie.ai/")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Config {
    /// Creates a configuration with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates the configuration and returns the normalized snapshot.
    ///
    /// Rules:
    /// - the API key must be non-empty after trimming,
    /// - the base URL must parse as a URL; trailing slashes are stripped,
    /// - the timeout must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigInvalid`] describing the first violated rule.
    pub fn normalize(mut self) -> Result<Self, SdkError> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::config(
                "API key must be a non-empty string",
                "pass your Kie.ai API key to Config::new",
            ));
        }

        if Url::parse(&self.base_url).is_err() {
            return Err(SdkError::config(
                format!("base URL '{}' is not a valid URL", self.base_url),
                "use an absolute URL like \"https://api.kie.ai\"",
            ));
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }

        if self.timeout.is_zero() {
            return Err(SdkError::config(
                "timeout must be positive",
                "use a duration like Duration::from_secs(30)",
            ));
        }

        Ok(self)
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the base URL (no trailing slash once normalized).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}
