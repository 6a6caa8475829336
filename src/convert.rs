use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ReadError;
use crate::value::JsonValue;

/// Parse JSON text and convert it into a [`JsonValue`] tree.
///
/// The root must be an object; an array, scalar, or null root fails with
/// [`ReadError::NotAnObject`]. Syntactically invalid text fails with
/// [`ReadError::Syntax`]. Below the root the mapping is total.
pub fn parse_object(text: &str) -> Result<JsonValue, ReadError> {
    let doc: Value = serde_json::from_str(text)?;
    convert(&doc)
}

/// Convert an already-parsed document, enforcing the object-root contract.
pub fn convert(doc: &Value) -> Result<JsonValue, ReadError> {
    match doc {
        Value::Object(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, val) in map {
                out.insert(key.clone(), to_value(val));
            }
            Ok(JsonValue::Object(out))
        }
        _ => Err(ReadError::NotAnObject),
    }
}

/// Total mapping over every JSON value kind. Never fails below the root.
fn to_value(val: &Value) -> JsonValue {
    match val {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(num) => classify_number(num.as_str()),
        // A string whose content is literally `null` maps to Null. This is
        // a compatibility quirk inherited from the original contract; see
        // DESIGN.md before relying on it.
        Value::String(s) if s == "null" => JsonValue::Null,
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_value).collect()),
        Value::Object(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, val) in map {
                out.insert(key.clone(), to_value(val));
            }
            JsonValue::Object(out)
        }
    }
}

/// Classify a number literal into the narrowest representation, in a fixed
/// order: bool, i32, i64, f64, f32, else the literal kept as a string.
/// The first parse that succeeds wins, so `42` is `Int` and never `Double`.
fn classify_number(literal: &str) -> JsonValue {
    if let Ok(b) = literal.parse::<bool>() {
        return JsonValue::Bool(b);
    }
    if let Ok(i) = literal.parse::<i32>() {
        return JsonValue::Int(i);
    }
    if let Ok(l) = literal.parse::<i64>() {
        return JsonValue::Long(l);
    }
    if let Ok(d) = literal.parse::<f64>() {
        return JsonValue::Double(d);
    }
    if let Ok(f) = literal.parse::<f32>() {
        return JsonValue::Float(f);
    }
    JsonValue::String(literal.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_small_integers_classify_as_int() {
        let value = parse_object(r#"{"n": 42}"#).unwrap();
        assert_eq!(value["n"], JsonValue::Int(42));
    }

    #[test]
    fn test_i32_boundaries() {
        let value = parse_object(r#"{"lo": -2147483648, "hi": 2147483647}"#).unwrap();
        assert_eq!(value["lo"], JsonValue::Int(i32::MIN));
        assert_eq!(value["hi"], JsonValue::Int(i32::MAX));
    }

    #[test]
    fn test_beyond_i32_classifies_as_long() {
        let value = parse_object(r#"{"n": 2147483648}"#).unwrap();
        assert_eq!(value["n"], JsonValue::Long(2_147_483_648));
        let value = parse_object(r#"{"n": 9223372036854775807}"#).unwrap();
        assert_eq!(value["n"], JsonValue::Long(i64::MAX));
    }

    #[test]
    fn test_fractions_and_exponents_classify_as_double() {
        let value = parse_object(r#"{"a": 3.5, "b": 1e3, "c": 42.0}"#).unwrap();
        assert_eq!(value["a"], JsonValue::Double(3.5));
        assert_eq!(value["b"], JsonValue::Double(1000.0));
        // the literal carries a fraction, so it never reaches the i32 parse
        assert_eq!(value["c"], JsonValue::Double(42.0));
    }

    #[test]
    fn test_beyond_i64_classifies_as_double() {
        let value = parse_object(r#"{"n": 9223372036854775808}"#).unwrap();
        assert_eq!(value["n"], JsonValue::Double(9.223_372_036_854_776e18));
    }

    #[test]
    fn test_string_literal_null_becomes_null() {
        // Inherited quirk: the four characters n-u-l-l inside a JSON string
        // convert to the null value, not the string "null".
        let value = parse_object(r#"{"s": "null"}"#).unwrap();
        assert_eq!(value["s"], JsonValue::Null);
    }

    #[test]
    fn test_other_strings_stay_strings() {
        let value = parse_object(r#"{"s": "NULL", "t": "nul", "u": "42"}"#).unwrap();
        assert_eq!(value["s"], JsonValue::String("NULL".into()));
        assert_eq!(value["t"], JsonValue::String("nul".into()));
        assert_eq!(value["u"], JsonValue::String("42".into()));
    }

    #[test]
    fn test_bool_and_null_scalars() {
        let value = parse_object(r#"{"t": true, "f": false, "n": null}"#).unwrap();
        assert_eq!(value["t"], JsonValue::Bool(true));
        assert_eq!(value["f"], JsonValue::Bool(false));
        assert_eq!(value["n"], JsonValue::Null);
    }

    #[test]
    fn test_nested_structures() {
        let value =
            parse_object(r#"{"outer": {"inner": [1, {"deep": "x"}, null]}}"#).unwrap();
        assert_eq!(value["outer"]["inner"][0], JsonValue::Int(1));
        assert_eq!(value["outer"]["inner"][1]["deep"].as_str(), Some("x"));
        assert!(value["outer"]["inner"][2].is_null());
    }

    #[test]
    fn test_object_key_order_preserved() {
        let value = parse_object(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_object_roots_fail_with_not_an_object() {
        for text in [r#"[1, 2]"#, r#""scalar""#, "42", "null", "true"] {
            let err = parse_object(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotAnObject, "input: {text}");
        }
    }

    #[test]
    fn test_invalid_syntax_fails_with_syntax() {
        let err = parse_object("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_conversion_round_trips_through_display() {
        let text = r#"{"title":"sample","count":3,"items":[true,null,"x"]}"#;
        let value = parse_object(text).unwrap();
        assert_eq!(value.to_string(), text);
    }
}
