//! Request and response types shared by every stage of the pipeline.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! executor derives an `OutgoingRequest` from a method, a path and a set of
//! `RequestOptions`, hands it to a `Transport`, and turns the `RawResponse`
//! it gets back into an `HttpResponse`. Nothing here performs I/O, so every
//! value can be built by hand in tests.
//!
//! All fields use owned types so values can outlive the call that produced
//! them (errors carry the outgoing request and the raw response).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request header map. Keys are kept exactly as supplied.
pub type Headers = HashMap<String, String>;

/// Look up a header by name, ignoring ASCII case.
pub(crate) fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(n) if n.is_nan() => f.write_str("NaN"),
            ParamValue::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(value: $t) -> Self {
                ParamValue::Int(i64::from(value))
            }
        })*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

/// Ordered query parameters. Duplicates are kept and emitted in order.
pub type Params = Vec<(String, ParamValue)>;

/// Request body as handed to the executor.
///
/// `Json` objects and arrays are serialized and tagged with
/// `Content-Type: application/json`. JSON scalars go out as their plain
/// string form and `null` sends no body at all. `Text` and `Bytes` are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(value))
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Bytes(value)
    }
}

/// Per-call options.
///
/// Every field is optional. When a call goes through a `Client`, headers
/// are merged key by key with the client defaults and every other field
/// replaces the default only when set.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: Option<Params>,
    pub data: Option<Payload>,
    pub timeout: Option<Duration>,
    pub base_url: Option<String>,
    pub headers: Headers,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    pub fn data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl OutgoingRequest {
    /// Body as UTF-8 text, if there is one and it is valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Response headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders(Vec<(String, String)>);

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`, compared without regard to ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for ResponseHeaders {
    fn from(headers: Vec<(String, String)>) -> Self {
        Self(headers)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Status line and headers of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub status_text: String,
    pub headers: ResponseHeaders,
}

impl ResponseHead {
    /// Fetch-style "ok": any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response exactly as the transport produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub head: ResponseHead,
    pub body: Bytes,
}

/// Decoded response body. The variant records which strategy produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(serde_json::Value),
    Text(String),
    Binary(Bytes),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseData::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// JSON rendering used when errors are serialized for logs.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            ResponseData::Json(v) => v.clone(),
            ResponseData::Text(s) => serde_json::Value::String(s.clone()),
            ResponseData::Binary(b) => serde_json::Value::from(b.to_vec()),
        }
    }
}

/// A successful response.
#[derive(Debug, Clone)]
pub struct HttpResponse<T = ResponseData> {
    pub data: T,
    pub status: u16,
    pub status_text: String,
    pub headers: ResponseHeaders,
    pub response: RawResponse,
}

impl HttpResponse<ResponseData> {
    /// Convert a JSON-decoded body into `U`.
    ///
    /// Fails with a decode error when the body was not decoded as JSON or
    /// does not match the shape of `U`.
    pub fn json<U: DeserializeOwned>(self) -> Result<HttpResponse<U>, HttpError> {
        let value = match self.data {
            ResponseData::Json(v) => v,
            _ => {
                return Err(HttpError::decode(
                    "response body was not decoded as JSON",
                    None,
                ))
            }
        };
        let data = serde_json::from_value(value)
            .map_err(|e| HttpError::decode(e.to_string(), None))?;
        Ok(HttpResponse {
            data,
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            response: self.response,
        })
    }
}
