//! Request body decoding by content type.
//!
//! Decoding happens once, before any handler runs. The result is the
//! payload as JSON, or `None` when the content type is not one we parse or
//! no bytes arrived.

use serde_json::Value;

use crate::error::InspectError;
use crate::inspect::fields::collect_pairs;

/// How a body is decoded, chosen from the `Content-Type` essence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json` and `*/*+json`.
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
    /// `text/plain`.
    Text,
    /// `application/octet-stream`.
    Raw,
}

impl BodyKind {
    /// Classify a `Content-Type` header value. Parameters are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Some(BodyKind::Json)
        } else if essence == "application/x-www-form-urlencoded" {
            Some(BodyKind::Form)
        } else if essence == "text/plain" {
            Some(BodyKind::Text)
        } else if essence == "application/octet-stream" {
            Some(BodyKind::Raw)
        } else {
            None
        }
    }
}

/// Decode `bytes` according to `content_type`.
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Option<Value>, InspectError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let Some(kind) = content_type.and_then(BodyKind::from_content_type) else {
        return Ok(None);
    };

    let value = match kind {
        BodyKind::Json => {
            let value: Value = serde_json::from_slice(bytes)?;
            if !(value.is_object() || value.is_array()) {
                return Err(InspectError::NonStructuredJson);
            }
            value
        }
        BodyKind::Form => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)?;
            let fields = collect_pairs(pairs)
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect();
            Value::Object(fields)
        }
        BodyKind::Text => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        BodyKind::Raw => buffer_value(bytes),
    };

    Ok(Some(value))
}

/// Raw bytes as `{"type": "Buffer", "data": [..]}`.
fn buffer_value(bytes: &[u8]) -> Value {
    let mut buffer = serde_json::Map::new();
    buffer.insert("type".to_owned(), Value::from("Buffer"));
    buffer.insert("data".to_owned(), Value::from(bytes.to_vec()));
    Value::Object(buffer)
}

/// Whether a decoded body counts as "no body" in a snapshot.
pub fn is_trivially_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_type_classification() {
        assert_eq!(BodyKind::from_content_type("application/json; charset=utf-8"), Some(BodyKind::Json));
        assert_eq!(BodyKind::from_content_type("application/vnd.api+json"), Some(BodyKind::Json));
        assert_eq!(BodyKind::from_content_type("Application/X-WWW-Form-Urlencoded"), Some(BodyKind::Form));
        assert_eq!(BodyKind::from_content_type("Text/Plain; charset=utf-8"), Some(BodyKind::Text));
        assert_eq!(BodyKind::from_content_type("text/csv"), None);
        assert_eq!(BodyKind::from_content_type("application/octet-stream"), Some(BodyKind::Raw));
        assert_eq!(BodyKind::from_content_type("image/png"), None);
    }

    #[test]
    fn test_json_body() {
        let body = parse_body(Some("application/json"), br#"{"name":"sample","n":[1,2]}"#).unwrap();
        assert_eq!(body, Some(json!({"name": "sample", "n": [1, 2]})));
    }

    #[test]
    fn test_json_primitives_rejected() {
        let err = parse_body(Some("application/json"), b"42").unwrap_err();
        assert!(matches!(err, InspectError::NonStructuredJson));

        let err = parse_body(Some("application/json"), b"{not json").unwrap_err();
        assert!(matches!(err, InspectError::MalformedJson(_)));
    }

    #[test]
    fn test_form_body() {
        let body = parse_body(Some("application/x-www-form-urlencoded"), b"a=1&b=x+y&a=2").unwrap();
        assert_eq!(body, Some(json!({"a": ["1", "2"], "b": "x y"})));
    }

    #[test]
    fn test_text_and_raw_bodies() {
        let text = parse_body(Some("text/plain"), b"hello").unwrap();
        assert_eq!(text, Some(json!("hello")));

        let raw = parse_body(Some("application/octet-stream"), &[0x68, 0x69, 0xff]).unwrap();
        assert_eq!(raw, Some(json!({"type": "Buffer", "data": [0x68, 0x69, 0xff]})));
    }

    #[test]
    fn test_unparsed_bodies_are_absent() {
        assert_eq!(parse_body(None, b"hello").unwrap(), None);
        assert_eq!(parse_body(Some("image/png"), b"\x89PNG").unwrap(), None);
        assert_eq!(parse_body(Some("text/html"), b"<p>hi</p>").unwrap(), None);
        assert_eq!(parse_body(Some("application/json"), b"").unwrap(), None);
    }

    #[test]
    fn test_trivially_empty() {
        assert!(is_trivially_empty(&json!({})));
        assert!(is_trivially_empty(&json!([])));
        assert!(is_trivially_empty(&json!("")));
        assert!(is_trivially_empty(&Value::Null));
        assert!(!is_trivially_empty(&json!({"a": null})));
        assert!(!is_trivially_empty(&json!([0])));
        assert!(!is_trivially_empty(&json!("x")));
    }
}
