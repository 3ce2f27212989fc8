//! Request execution: turn a method, path and options into a response or
//! an `HttpError`.
//!
//! # Design
//! `request` is stateless. Each call derives its own `OutgoingRequest`,
//! runs it through the timeout guard, decodes the body and checks the
//! status. Every failure on the way already is an `HttpError`; the only
//! thing added here is the outgoing request for errors raised before it
//! existed.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, field, instrument, Span};

use crate::decode::{decode_body, DecodeStrategy};
use crate::error::{HttpError, Result};
use crate::http::{
    find_header, Headers, HttpMethod, HttpResponse, OutgoingRequest, Payload, RequestOptions,
    ResponseData,
};
use crate::timeout::send_with_timeout;
use crate::transport::Transport;
use crate::url_builder::build_url;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("SimpleHttp/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Execute one request.
///
/// Responses with a 2xx status come back as `HttpResponse`. Everything
/// else, including non-2xx responses, is an `HttpError`.
#[instrument(skip_all, fields(method = %method, path = %path, url = field::Empty))]
pub async fn request(
    transport: &dyn Transport,
    method: HttpMethod,
    path: &str,
    options: RequestOptions,
) -> Result<HttpResponse> {
    let outgoing = prepare_request(method, path, &options)?;
    Span::current().record("url", outgoing.url.as_str());
    debug!("sending request");

    let raw = send_with_timeout(transport, &outgoing, options.timeout).await?;
    debug!(status = raw.head.status, "response received");

    // HEAD never carries a body, so there is no JSON to parse.
    let data = if method == HttpMethod::Head
        && raw.body.is_empty()
        && DecodeStrategy::for_headers(&raw.head.headers) == DecodeStrategy::Json
    {
        ResponseData::Binary(Bytes::new())
    } else {
        decode_body(&raw.head.headers, raw.body.clone())
            .map_err(|e| HttpError::decode(e, Some(outgoing.clone())))?
    };

    if !raw.head.is_ok() {
        debug!(status = raw.head.status, "non-success status");
        return Err(HttpError::http_status(raw, data, Some(outgoing)));
    }

    Ok(HttpResponse {
        data,
        status: raw.head.status,
        status_text: raw.head.status_text.clone(),
        headers: raw.head.headers.clone(),
        response: raw,
    })
}

/// Derive the request the transport will see.
///
/// Header precedence, lowest first: `Accept` and `User-Agent` defaults,
/// then the automatic JSON `Content-Type`, then caller headers. A caller
/// `Content-Type` in any letter case suppresses the automatic one.
pub fn prepare_request(
    method: HttpMethod,
    path: &str,
    options: &RequestOptions,
) -> Result<OutgoingRequest> {
    let mut headers = Headers::new();
    headers.insert("Accept".to_string(), JSON.to_string());
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());

    let (body, is_json) = match &options.data {
        Some(payload) => encode_payload(payload),
        None => (None, false),
    };
    if is_json && find_header(&options.headers, "content-type").is_none() {
        headers.insert("Content-Type".to_string(), JSON.to_string());
    }
    headers.extend(
        options
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    let mut outgoing = OutgoingRequest {
        method,
        url: path.to_string(),
        headers,
        body,
    };
    outgoing.url = build_url(path, options.base_url.as_deref(), options.params.as_ref())
        .map_err(|e| e.with_request(&outgoing))?;
    Ok(outgoing)
}

/// Body bytes for `payload`, and whether they are serialized JSON.
fn encode_payload(payload: &Payload) -> (Option<Bytes>, bool) {
    match payload {
        Payload::Json(Value::Null) => (None, false),
        Payload::Json(value @ (Value::Object(_) | Value::Array(_))) => {
            (Some(Bytes::from(value.to_string())), true)
        }
        Payload::Json(Value::String(s)) => (Some(Bytes::from(s.clone())), false),
        Payload::Json(scalar) => (Some(Bytes::from(scalar.to_string())), false),
        Payload::Text(text) => (Some(Bytes::from(text.clone())), false),
        Payload::Bytes(bytes) => (Some(bytes.clone()), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn absolute() -> RequestOptions {
        RequestOptions::new().base_url("https://api.example.com")
    }

    #[test]
    fn defaults_are_accept_and_user_agent() {
        let req = prepare_request(HttpMethod::Get, "/test", &absolute()).unwrap();
        assert_eq!(req.url, "https://api.example.com/test");
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some(JSON));
        assert_eq!(
            req.headers.get("User-Agent").map(String::as_str),
            Some(USER_AGENT)
        );
        assert_eq!(req.headers.len(), 2);
        assert!(req.body.is_none());
    }

    #[test]
    fn user_agent_embeds_version() {
        assert_eq!(USER_AGENT, format!("SimpleHttp/{VERSION}"));
    }

    #[test]
    fn object_payload_is_serialized_with_content_type() {
        let data = json!({"name": "test", "tags": [1, 2]});
        let opts = absolute().data(data.clone());
        let req = prepare_request(HttpMethod::Post, "/items", &opts).unwrap();

        let sent: Value = serde_json::from_str(req.body_text().unwrap()).unwrap();
        assert_eq!(sent, data);
        assert_eq!(req.headers.get("Content-Type").map(String::as_str), Some(JSON));
    }

    #[test]
    fn array_payload_is_serialized() {
        let opts = absolute().data(json!([1, 2, 3]));
        let req = prepare_request(HttpMethod::Put, "/items", &opts).unwrap();
        assert_eq!(req.body_text(), Some("[1,2,3]"));
        assert!(req.headers.contains_key("Content-Type"));
    }

    #[test]
    fn caller_content_type_wins_in_any_case() {
        let opts = absolute()
            .data(json!({"a": 1}))
            .header("content-type", "application/vnd.api+json");
        let req = prepare_request(HttpMethod::Post, "/items", &opts).unwrap();
        assert_eq!(
            find_header(&req.headers, "Content-Type"),
            Some("application/vnd.api+json")
        );
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[test]
    fn caller_headers_override_defaults() {
        let opts = absolute().header("Accept", "text/plain");
        let req = prepare_request(HttpMethod::Get, "/", &opts).unwrap();
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("text/plain"));
    }

    #[test]
    fn non_object_payloads_pass_through() {
        let cases = [
            (Payload::Text("raw text".to_string()), Some("raw text")),
            (Payload::Json(json!("plain")), Some("plain")),
            (Payload::Json(json!(42)), Some("42")),
            (Payload::Json(json!(true)), Some("true")),
            (Payload::Json(Value::Null), None),
        ];
        for (payload, expected) in cases {
            let opts = absolute().data(payload);
            let req = prepare_request(HttpMethod::Post, "/", &opts).unwrap();
            assert_eq!(req.body_text(), expected);
            assert!(!req.headers.contains_key("Content-Type"));
        }
    }

    #[test]
    fn binary_payload_is_untouched() {
        let opts = absolute().data(vec![0u8, 1, 2, 255]);
        let req = prepare_request(HttpMethod::Post, "/upload", &opts).unwrap();
        assert_eq!(req.body.as_deref(), Some(&[0u8, 1, 2, 255][..]));
    }

    #[test]
    fn url_error_carries_the_request() {
        let err = prepare_request(HttpMethod::Get, "/relative", &RequestOptions::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Url);
        let req = err.request().unwrap();
        assert_eq!(req.url, "/relative");
        assert_eq!(req.method, HttpMethod::Get);
    }
}
