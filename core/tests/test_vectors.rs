//! Verify URL building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case lists a base URL, a path and ordered query parameters together
//! with the URL the pipeline must produce. The same cases are checked
//! through `build_url` directly and through `prepare_request`.

use simple_http::executor::prepare_request;
use simple_http::url_builder::build_url;
use simple_http::{HttpMethod, ParamValue, Params, RequestOptions};

/// Convert a JSON scalar from a vector file into a `ParamValue`.
fn param_value(value: &serde_json::Value) -> ParamValue {
    match value {
        serde_json::Value::String(s) => ParamValue::Str(s.clone()),
        serde_json::Value::Bool(b) => ParamValue::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ParamValue::Int(i),
            None => ParamValue::Float(n.as_f64().unwrap()),
        },
        other => panic!("unsupported param value: {other}"),
    }
}

fn params(case: &serde_json::Value) -> Params {
    case["params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), param_value(&pair[1]))
        })
        .collect()
}

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let base_url = case["base_url"].as_str();
        let path = case["path"].as_str().unwrap();
        let expected = case["expected_url"].as_str().unwrap();
        let params = params(case);

        let url = build_url(path, base_url, Some(&params)).unwrap();
        assert_eq!(url, expected, "{name}: build_url");

        let mut options = RequestOptions::new();
        options.base_url = base_url.map(str::to_string);
        options.params = Some(params);
        let req = prepare_request(HttpMethod::Get, path, &options).unwrap();
        assert_eq!(req.url, expected, "{name}: prepare_request");
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
    }
}
