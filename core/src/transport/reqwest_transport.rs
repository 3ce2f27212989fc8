//! `Transport` backed by `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::instrument;

use super::{AbortSignal, Transport, TransportError};
use crate::http::{HttpMethod, OutgoingRequest, RawResponse, ResponseHead, ResponseHeaders};

/// HTTP transport using a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Reuse an existing client, keeping its pool and TLS settings.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn round_trip(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Connect {
                    message: e.to_string(),
                }
            } else {
                TransportError::Request {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let headers: ResponseHeaders = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str(), v)))
            .collect();
        let head = ResponseHead {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
        };
        let body = response.bytes().await.map_err(|e| TransportError::Body {
            message: e.to_string(),
        })?;

        Ok(RawResponse { head, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn send(
        &self,
        request: &OutgoingRequest,
        signal: Option<AbortSignal>,
    ) -> Result<RawResponse, TransportError> {
        match signal {
            Some(signal) => {
                tokio::select! {
                    _ = signal.aborted() => Err(TransportError::Aborted),
                    result = self.round_trip(request) => result,
                }
            }
            None => self.round_trip(request).await,
        }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}
