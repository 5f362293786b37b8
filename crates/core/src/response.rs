use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Raw status and body text captured from the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelayResponse {
    pub status: u16,
    pub body_text: String,
}

/// Interpreted webhook response body.
///
/// Serializes as `null`, the parsed JSON value, or `{"raw": "<text>"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The upstream returned no body.
    Empty,
    /// The body parsed as JSON.
    Structured(Value),
    /// The body was not JSON; kept verbatim.
    Raw(String),
}

impl ResponseBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Structured(value) => value.clone(),
            Self::Raw(text) => serde_json::json!({ "raw": text }),
        }
    }
}

impl Serialize for ResponseBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Structured(value) => value.serialize(serializer),
            Self::Raw(text) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw", text)?;
                map.end()
            }
        }
    }
}

/// Classify response text as empty, JSON, or opaque text. Never fails.
pub fn interpret(body_text: &str) -> ResponseBody {
    if body_text.is_empty() {
        return ResponseBody::Empty;
    }
    match serde_json::from_str::<Value>(body_text) {
        Ok(value) => ResponseBody::Structured(value),
        Err(_) => ResponseBody::Raw(body_text.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_body_is_null() {
        assert_eq!(interpret(""), ResponseBody::Empty);
        assert_eq!(serde_json::to_value(interpret("")).unwrap(), Value::Null);
    }

    #[test]
    fn json_body_is_structured() {
        assert_eq!(interpret(r#"{"a":1}"#), ResponseBody::Structured(json!({"a": 1})));
        assert_eq!(interpret("[1,2]"), ResponseBody::Structured(json!([1, 2])));
        assert_eq!(interpret("\"hi\""), ResponseBody::Structured(json!("hi")));
        assert_eq!(interpret("null"), ResponseBody::Structured(Value::Null));
    }

    #[test]
    fn non_json_body_is_raw() {
        let body = interpret("not json");
        assert_eq!(body, ResponseBody::Raw("not json".into()));
        assert_eq!(body.to_value(), json!({"raw": "not json"}));
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"raw":"not json"}"#
        );
    }

    #[test]
    fn whitespace_only_body_is_raw() {
        assert_eq!(interpret("  \n"), ResponseBody::Raw("  \n".into()));
    }

    #[test]
    fn structured_object_keeps_key_order() {
        let body = interpret(r#"{"z":1,"a":2,"m":3}"#);
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }
}
