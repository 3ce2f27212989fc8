//! Query string encoding.

use url::form_urlencoded;

use crate::http::ParamValue;

/// Encode `params` as `application/x-www-form-urlencoded` query text
/// without the leading `?`.
///
/// Values are rendered with their `Display` form, pairs keep their input
/// order and are joined with `&`. No pairs yields an empty string.
pub fn encode_query<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = &'a (String, ParamValue)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}
