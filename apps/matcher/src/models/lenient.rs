//! Field decoders for data-source records. A field of the wrong type decodes as
//! absent instead of failing the whole record.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` so a missing key still
//! takes the field's default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string, or `None` for anything else.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Like `string`, but empty instead of `None`.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// The string entries of an array. Non-string entries are dropped; a non-array
/// is `None`.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(strings_of(items)),
        _ => None,
    })
}

/// Like `string_list`, but empty instead of `None`.
pub fn string_list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?.unwrap_or_default())
}

/// The value as sent, keeping an explicit `null` as `Some(Value::Null)` so it
/// can be told apart from a missing key.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn strings_of(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "super::string_list")]
        tags: Option<Vec<String>>,
        #[serde(default, deserialize_with = "super::present")]
        raw: Option<Value>,
    }

    fn sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wrong_types_decode_as_absent() {
        let s = sample(json!({"name": 42, "tags": "Rust"}));
        assert_eq!(s.name, None);
        assert_eq!(s.tags, None);
    }

    #[test]
    fn test_list_keeps_only_strings() {
        let s = sample(json!({"tags": ["Go", 3, null, "Rust", {"x": 1}]}));
        assert_eq!(s.tags, Some(vec!["Go".to_string(), "Rust".to_string()]));
    }

    #[test]
    fn test_present_distinguishes_null_from_missing() {
        assert_eq!(sample(json!({})).raw, None);
        assert_eq!(sample(json!({"raw": null})).raw, Some(Value::Null));
        assert_eq!(sample(json!({"raw": 3})).raw, Some(json!(3)));
    }
}
