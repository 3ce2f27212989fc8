//! Client-level configuration.
//!
//! # Design
//! `ClientConfig` is plain data captured once by a `Client` and never
//! mutated afterwards, so a client can be cloned and shared across tasks
//! without locking. The two hooks are single functions, not chains.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::http::{Headers, RequestOptions, ResponseData, ResponseHead};

/// Environment variable holding the default base URL.
pub const BASE_URL_ENV: &str = "SIMPLE_HTTP_BASE_URL";

/// Environment variable holding the default timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "SIMPLE_HTTP_TIMEOUT_MS";

/// Rewrites the merged per-call options right before execution.
pub type BeforeRequest = Arc<dyn Fn(RequestOptions) -> RequestOptions + Send + Sync>;

/// Rewrites the decoded body of a successful response.
pub type AfterResponse = Arc<dyn Fn(&ResponseHead, ResponseData) -> ResponseData + Send + Sync>;

/// Defaults applied to every call made through a `Client`.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub headers: Headers,
    pub timeout: Option<Duration>,
    pub before_request: Option<BeforeRequest>,
    pub after_response: Option<AfterResponse>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `SIMPLE_HTTP_BASE_URL` and `SIMPLE_HTTP_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            base_url: lookup(BASE_URL_ENV).filter(|v| !v.is_empty()),
            ..Self::default()
        };
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.timeout = Some(Duration::from_millis(ms)),
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_before_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(RequestOptions) -> RequestOptions + Send + Sync + 'static,
    {
        self.before_request = Some(Arc::new(hook));
        self
    }

    pub fn with_after_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ResponseHead, ResponseData) -> ResponseData + Send + Sync + 'static,
    {
        self.after_response = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("before_request", &self.before_request.is_some())
            .field("after_response", &self.after_response.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_both_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com"),
            (TIMEOUT_ENV, "2500"),
        ]));
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")]));
        assert!(config.timeout.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let config = ClientConfig::new()
            .with_base_url("https://api.example.com")
            .with_header("Authorization", "Bearer token123")
            .with_timeout(Duration::from_secs(3))
            .with_before_request(|opts| opts);
        assert_eq!(config.headers["Authorization"], "Bearer token123");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert!(config.before_request.is_some());
        assert!(config.after_response.is_none());
    }

    #[test]
    fn debug_does_not_require_debug_hooks() {
        let config = ClientConfig::new().with_after_response(|_, data| data);
        let rendered = format!("{config:?}");
        assert!(rendered.contains("after_response: true"));
    }
}
