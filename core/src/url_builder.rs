//! Absolute URL construction from a base URL, a path and query parameters.
//!
//! # Design
//! Resolution follows the usual base + reference rules, so a path that
//! starts with `/` replaces the whole base path while a relative path is
//! appended under it. The base is normalized to end with exactly one `/`
//! first, which makes `https://api.example.com` + `/test` and
//! `https://api.example.com/` + `test` land on the same URL.

use url::Url;

use crate::error::HttpError;
use crate::http::Params;
use crate::query::encode_query;

/// Resolve `path` against `base_url` and attach `params` as the query.
///
/// Without a base URL (or with an empty one) `path` must be absolute.
/// Non-empty `params` replace any query already present in `path`; empty
/// or missing `params` leave it alone.
pub fn build_url(
    path: &str,
    base_url: Option<&str>,
    params: Option<&Params>,
) -> Result<String, HttpError> {
    let mut url = match base_url.filter(|b| !b.is_empty()) {
        Some(base) => {
            let base = if base.ends_with('/') {
                Url::parse(base)
            } else {
                Url::parse(&format!("{base}/"))
            }
            .map_err(|e| HttpError::url(format!("invalid base URL {base:?}: {e}"), None))?;
            base.join(path)
                .map_err(|e| HttpError::url(format!("invalid URL {path:?}: {e}"), None))?
        }
        None => Url::parse(path)
            .map_err(|e| HttpError::url(format!("invalid URL {path:?}: {e}"), None))?,
    };

    if let Some(params) = params.filter(|p| !p.is_empty()) {
        url.set_query(Some(&encode_query(params)));
    }

    Ok(url.to_string())
}
