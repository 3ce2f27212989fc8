//! Content-type driven body decoding.

use bytes::Bytes;

use crate::http::{ResponseData, ResponseHeaders};

/// How a body is turned into `ResponseData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Json,
    Text,
    Binary,
}

impl DecodeStrategy {
    /// Pick a strategy from the `Content-Type` header. A missing header
    /// counts as empty and therefore selects `Binary`.
    pub fn for_headers(headers: &ResponseHeaders) -> Self {
        let content_type = headers
            .get("content-type")
            .unwrap_or_default()
            .to_ascii_lowercase();
        if content_type.contains("application/json") {
            DecodeStrategy::Json
        } else if content_type.contains("text/") {
            DecodeStrategy::Text
        } else {
            DecodeStrategy::Binary
        }
    }
}

/// Decode `body` with the strategy its headers select.
///
/// There is no fallback: a JSON content type with a body that is not JSON
/// (including an empty one) is an error.
pub fn decode_body(headers: &ResponseHeaders, body: Bytes) -> Result<ResponseData, serde_json::Error> {
    Ok(match DecodeStrategy::for_headers(headers) {
        DecodeStrategy::Json => ResponseData::Json(serde_json::from_slice(&body)?),
        DecodeStrategy::Text => ResponseData::Text(String::from_utf8_lossy(&body).into_owned()),
        DecodeStrategy::Binary => ResponseData::Binary(body),
    })
}
