//! Tolerant deserializers for rows coming out of the results store.
//!
//! The store hands back structured columns either as inline JSON or as a
//! JSON document serialized into a string, and uses `""` where it means null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an inline JSON value or a string holding one. `""` and `null` become the default.
pub fn deserialize_defaulted_string_or_parsed_json<'de, D, T>(
    deserializer: D,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(deserialize_optional_string_or_parsed_json(deserializer)?.unwrap_or_default())
}

/// Accepts an inline JSON value or a string holding one. `""` and `null` become `None`.
pub fn deserialize_optional_string_or_parsed_json<'de, D, T>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        value => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Reads an optional string where `""` means absent.
pub fn deserialize_non_empty_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(T::from))
}

/// Reads a boolean written as `true`/`false`, `0`/`1`, or either of those as a string.
pub fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(serde::de::Error::custom(format!("expected 0 or 1, got {}", n))),
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("expected a boolean, got {:?}", s))),
        },
        _ => Err(serde::de::Error::custom(format!("expected a boolean, got {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Inner {
        foo: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "deserialize_defaulted_string_or_parsed_json")]
        inner: Inner,
        #[serde(default, deserialize_with = "deserialize_optional_string_or_parsed_json")]
        maybe: Option<Inner>,
        #[serde(default, deserialize_with = "deserialize_non_empty_string")]
        id: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "deserialize_flexible_bool")]
        flag: bool,
    }

    #[test]
    fn test_flexible_bool_forms() {
        for (raw, expected) in [
            (r#"{"flag": true}"#, true),
            (r#"{"flag": 1}"#, true),
            (r#"{"flag": "1"}"#, true),
            (r#"{"flag": 0}"#, false),
            (r#"{"flag": "false"}"#, false),
            (r#"{}"#, false),
        ] {
            let parsed: Flag = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.flag, expected, "input: {}", raw);
        }
    }

    #[test]
    fn test_flexible_bool_rejects_other_numbers() {
        let result: Result<Flag, _> = serde_json::from_str(r#"{"flag": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_doubly_serialized_string() {
        let outer: Outer = serde_json::from_str(r#"{"inner": "{\"foo\": 3}"}"#).unwrap();
        assert_eq!(outer.inner, Inner { foo: 3 });
    }

    #[test]
    fn test_inline_object() {
        let outer: Outer =
            serde_json::from_str(r#"{"inner": {"foo": 4}, "maybe": {"foo": 5}}"#).unwrap();
        assert_eq!(outer.inner, Inner { foo: 4 });
        assert_eq!(outer.maybe, Some(Inner { foo: 5 }));
    }

    #[test]
    fn test_empty_string_is_absent() {
        let outer: Outer = serde_json::from_str(r#"{"inner": "", "maybe": "", "id": ""}"#).unwrap();
        assert_eq!(outer.inner, Inner::default());
        assert_eq!(outer.maybe, None);
        assert_eq!(outer.id, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let outer: Outer = serde_json::from_str("{}").unwrap();
        assert_eq!(outer.inner, Inner::default());
        assert_eq!(outer.maybe, None);
        assert_eq!(outer.id, None);
    }

    #[test]
    fn test_invalid_embedded_json_is_an_error() {
        let result: Result<Outer, _> = serde_json::from_str(r#"{"inner": "{not json"}"#);
        assert!(result.is_err());
    }
}
