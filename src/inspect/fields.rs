//! Name/value mappings rendered into snapshots: headers, query, cookies.

use std::collections::BTreeMap;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use cookie::Cookie;
use serde::Serialize;
use serde_json::Value;

/// A field that may carry one or several values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(field: FieldValue) -> Self {
        match field {
            FieldValue::Single(value) => Value::String(value),
            FieldValue::Multiple(values) => {
                Value::Array(values.into_iter().map(Value::String).collect())
            }
        }
    }
}

/// Ordered mapping of field name to value(s).
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Fold `(key, value)` pairs into a map; repeated keys become arrays.
pub fn collect_pairs<I>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map = FieldMap::new();
    for (key, value) in pairs {
        match map.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                map.insert(key, FieldValue::Single(value));
            }
        }
    }
    map
}

fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

/// Render request headers keyed by lower-case name.
///
/// Repeated headers are joined with `", "`, `cookie` with `"; "`, and
/// `set-cookie` is always an array.
pub fn render_headers(headers: &HeaderMap) -> FieldMap {
    headers
        .keys()
        .map(|name| {
            let values: Vec<String> = headers.get_all(name).iter().map(header_text).collect();
            let rendered = if *name == SET_COOKIE {
                FieldValue::Multiple(values)
            } else if *name == COOKIE {
                FieldValue::Single(values.join("; "))
            } else {
                FieldValue::Single(values.join(", "))
            };
            (name.as_str().to_owned(), rendered)
        })
        .collect()
}

/// Parse a raw query string. Undecodable input yields an empty map.
pub fn parse_query(query: Option<&str>) -> FieldMap {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return FieldMap::new();
    };
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
    collect_pairs(pairs)
}

/// Parse every `Cookie` header into name → value. The first occurrence of a
/// name wins; malformed pairs are skipped.
pub fn parse_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(raw).flatten() {
            cookies
                .entry(cookie.name().to_owned())
                .or_insert_with(|| cookie.value().to_owned());
        }
    }
    cookies
}

/// Value of a header as text, if present.
pub fn header_str(headers: &HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<String> {
    headers.get(name).map(header_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_headers_joins_repeats() {
        let mut headers = HeaderMap::new();
        headers.append("X-Trace", HeaderValue::from_static("a"));
        headers.append("X-Trace", HeaderValue::from_static("b"));
        headers.append("Accept", HeaderValue::from_static("*/*"));

        let rendered = render_headers(&headers);
        assert_eq!(rendered["x-trace"], FieldValue::Single("a, b".into()));
        assert_eq!(rendered["accept"], FieldValue::Single("*/*".into()));
    }

    #[test]
    fn test_render_headers_cookie_rules() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2"));
        headers.append(SET_COOKIE, HeaderValue::from_static("s=1"));

        let rendered = render_headers(&headers);
        assert_eq!(rendered["cookie"], FieldValue::Single("a=1; b=2".into()));
        assert_eq!(rendered["set-cookie"], FieldValue::Multiple(vec!["s=1".into()]));
    }

    #[test]
    fn test_parse_query_repeated_keys() {
        let query = parse_query(Some("a=1&b=two%20words&a=3"));
        assert_eq!(query["a"], FieldValue::Multiple(vec!["1".into(), "3".into()]));
        assert_eq!(query["b"], FieldValue::Single("two words".into()));
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }

    #[test]
    fn test_parse_cookies_first_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=abc; theme=dark; session=zzz"));

        let cookies = parse_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["session"], "abc");
        assert_eq!(cookies["theme"], "dark");
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let single = serde_json::to_value(FieldValue::Single("x".into())).unwrap();
        let multiple = serde_json::to_value(FieldValue::Multiple(vec!["x".into(), "y".into()])).unwrap();
        assert_eq!(single, serde_json::json!("x"));
        assert_eq!(multiple, serde_json::json!(["x", "y"]));
    }
}
