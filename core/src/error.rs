//! The single error type surfaced by the client.
//!
//! # Design
//! Every failure leaves `request` as an `HttpError`. The `kind`
//! discriminant tells callers what went wrong; `status` and `data` are only
//! ever set for `HttpStatus`, because that is the only kind where a
//! response actually arrived. Timeouts get a dedicated kind and name so
//! callers can branch on them without string matching.

use std::time::Duration;

use serde_json::json;

use crate::http::{OutgoingRequest, RawResponse, ResponseData};

pub type Result<T> = std::result::Result<T, HttpError>;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The configured timeout elapsed before the transport completed.
    Timeout,
    /// The transport failed for a reason other than our own timeout.
    Network,
    /// The body could not be decoded with the strategy its content type selected.
    Decode,
    /// The base URL, path or query could not be turned into a URL.
    Url,
}

/// Error returned by every request.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    data: Option<ResponseData>,
    response: Option<RawResponse>,
    request: Option<OutgoingRequest>,
}

impl HttpError {
    fn new(kind: ErrorKind, message: String, request: Option<OutgoingRequest>) -> Self {
        Self {
            kind,
            message,
            status: None,
            data: None,
            response: None,
            request,
        }
    }

    /// Non-2xx response. `data` is the decoded body.
    pub fn http_status(
        response: RawResponse,
        data: ResponseData,
        request: Option<OutgoingRequest>,
    ) -> Self {
        let message = format!(
            "HTTP Error: {} {}",
            response.head.status, response.head.status_text
        );
        Self {
            kind: ErrorKind::HttpStatus,
            message,
            status: Some(response.head.status),
            data: Some(data),
            response: Some(response),
            request,
        }
    }

    pub fn timeout(timeout: Duration, request: Option<OutgoingRequest>) -> Self {
        let message = format!("Request timed out after {}ms", millis(timeout));
        Self::new(ErrorKind::Timeout, message, request)
    }

    pub fn network(cause: impl std::fmt::Display, request: Option<OutgoingRequest>) -> Self {
        Self::new(ErrorKind::Network, failed(cause), request)
    }

    pub fn decode(cause: impl std::fmt::Display, request: Option<OutgoingRequest>) -> Self {
        Self::new(ErrorKind::Decode, failed(cause), request)
    }

    pub fn url(cause: impl std::fmt::Display, request: Option<OutgoingRequest>) -> Self {
        Self::new(ErrorKind::Url, failed(cause), request)
    }

    /// Attach the outgoing request if none is recorded yet.
    pub(crate) fn with_request(mut self, request: &OutgoingRequest) -> Self {
        if self.request.is_none() {
            self.request = Some(request.clone());
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn data(&self) -> Option<&ResponseData> {
        self.data.as_ref()
    }

    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    pub fn request(&self) -> Option<&OutgoingRequest> {
        self.request.as_ref()
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }

    /// `"TimeoutError"` for timeouts, `"SimpleHttpError"` for everything else.
    pub fn name(&self) -> &'static str {
        match self.kind {
            ErrorKind::Timeout => "TimeoutError",
            _ => "SimpleHttpError",
        }
    }

    /// Plain JSON view for logging: `name`, `message`, `status`, `data`.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name(),
            "message": self.message,
            "status": self.status,
            "data": self.data.as_ref().map(ResponseData::to_value),
        })
    }
}

/// Milliseconds without rounding: `1500`, `0.5`, `2.000001`.
fn millis(duration: Duration) -> String {
    let whole = duration.as_millis();
    let frac = duration.subsec_nanos() % 1_000_000;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:06}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

fn failed(cause: impl std::fmt::Display) -> String {
    format!("Request failed: {cause}")
}
