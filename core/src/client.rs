//! Client bound to a configuration and a transport.
//!
//! # Design
//! `Client` captures an immutable `ClientConfig` and a shared `Transport`.
//! Each verb merges the call's options over the config and calls
//! `executor::request`; the client itself keeps no per-call state.

use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor;
use crate::http::{HttpMethod, HttpResponse, Payload, RequestOptions};
use crate::transport::Transport;

/// HTTP client with `get`/`post`/`put`/`delete`/`patch` shortcuts.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

/// Build a `Client` over the default transport.
#[cfg(feature = "reqwest")]
pub fn create_client(config: ClientConfig) -> Client {
    Client::new(config)
}

impl Client {
    #[cfg(feature = "reqwest")]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(crate::transport::ReqwestTransport::default()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(HttpMethod::Get, path, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        self.request(HttpMethod::Post, path, options.data(data)).await
    }

    pub async fn put(
        &self,
        path: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        self.request(HttpMethod::Put, path, options.data(data)).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(HttpMethod::Delete, path, options).await
    }

    pub async fn patch(
        &self,
        path: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        self.request(HttpMethod::Patch, path, options.data(data)).await
    }

    /// Any method, with client defaults and hooks applied.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let mut options = self.merge(options);
        if let Some(hook) = &self.config.before_request {
            options = hook(options);
        }

        let mut response = executor::request(self.transport.as_ref(), method, path, options).await?;

        if let Some(hook) = &self.config.after_response {
            response.data = hook(&response.response.head, response.data);
        }
        Ok(response)
    }

    /// Call options over client defaults. Headers merge per key; every other
    /// field falls back to the default only when unset.
    fn merge(&self, options: RequestOptions) -> RequestOptions {
        let mut headers = self.config.headers.clone();
        headers.extend(options.headers);
        RequestOptions {
            params: options.params,
            data: options.data,
            timeout: options.timeout.or(self.config.timeout),
            base_url: options
                .base_url
                .filter(|b| !b.is_empty())
                .or_else(|| self.config.base_url.clone()),
            headers,
        }
    }
}

#[cfg(feature = "reqwest")]
impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
