//! `mockValue`: deterministic sample data per field type.
//!
//! Values are derived from the element index only, so rendering the same
//! context twice yields the same mock file. Text-like values come out as
//! single-quoted TypeScript literals; numbers and booleans are bare.

use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::domain::{FieldType, value};
use crate::engine::error::HelperError;

const HELPER: &str = "mockValue";

pub(super) fn mock_value(arg: &Value) -> Result<String, HelperError> {
    let (type_name, index) = parse_args(arg)?;
    let Ok(field_type) = type_name.parse::<FieldType>() else {
        return Ok("null".to_string());
    };
    Ok(render(field_type, index))
}

fn render(field_type: FieldType, index: u64) -> String {
    match field_type {
        FieldType::String => quoted(format!("Sample string {}", index + 1)),
        FieldType::Number => (splitmix64(index) % 1000 + 1).to_string(),
        FieldType::Boolean => (splitmix64(index) >> 63 == 1).to_string(),
        FieldType::Date => NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(index)))
            .map(|d| quoted(d.format("%Y-%m-%d").to_string()))
            .unwrap_or_else(|| "null".to_string()),
        FieldType::Email => quoted(format!("user{index}@example.com")),
        FieldType::Phone => quoted(format!("555-01{:02}", index % 100)),
        FieldType::Url => quoted(format!("https://example.com/item/{index}")),
    }
}

fn quoted(s: String) -> String {
    format!("'{s}'")
}

/// Accepts `"type"`, `["type", index]` or `{"type": .., "index": ..}`.
fn parse_args(arg: &Value) -> Result<(&str, u64), HelperError> {
    let (type_value, index_value) = match arg {
        Value::Array(items) => (items.first(), items.get(1)),
        Value::Object(fields) => (fields.get("type"), fields.get("index")),
        other => (Some(other), None),
    };

    let type_name = match type_value {
        Some(Value::String(s)) => s.as_str(),
        other => return Err(invalid("a field type string", other)),
    };
    let index = match index_value {
        None | Some(Value::Null) => 0,
        Some(v) => v.as_u64().ok_or_else(|| invalid("a non-negative integer index", Some(v)))?,
    };
    Ok((type_name, index))
}

fn invalid(expected: &'static str, found: Option<&Value>) -> HelperError {
    HelperError::InvalidArgument {
        helper: HELPER.to_string(),
        expected,
        found: found.map_or("nothing", value::kind_of).to_string(),
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock(arg: Value) -> String {
        mock_value(&arg).unwrap()
    }

    #[test]
    fn text_like_types() {
        assert_eq!(mock(json!("string")), "'Sample string 1'");
        assert_eq!(mock(json!(["string", 4])), "'Sample string 5'");
        assert_eq!(mock(json!(["email", 2])), "'user2@example.com'");
        assert_eq!(mock(json!(["phone", 7])), "'555-0107'");
        assert_eq!(mock(json!(["url", 1])), "'https://example.com/item/1'");
    }

    #[test]
    fn phone_numbers_keep_their_shape_for_large_indices() {
        assert_eq!(mock(json!(["phone", 123])), "'555-0123'");
        assert_eq!(mock(json!(["phone", 100])), "'555-0100'");
        assert_eq!(mock(json!(["phone", 99])), "'555-0199'");
    }

    #[test]
    fn dates_advance_by_index() {
        assert_eq!(mock(json!("date")), "'2024-01-01'");
        assert_eq!(mock(json!({"type": "date", "index": 31})), "'2024-02-01'");
    }

    #[test]
    fn numbers_and_booleans_are_deterministic() {
        for i in 0..50u64 {
            let n: u64 = mock(json!(["number", i])).parse().unwrap();
            assert!((1..=1000).contains(&n));
            assert_eq!(mock(json!(["number", i])), n.to_string());

            let b = mock(json!(["boolean", i]));
            assert!(b == "true" || b == "false");
            assert_eq!(b, mock(json!(["boolean", i])));
        }
    }

    #[test]
    fn aliases_and_unknown_types() {
        assert_eq!(mock(json!(["int", 0])), mock(json!(["number", 0])));
        assert_eq!(mock(json!("uuid")), "null");
    }

    #[test]
    fn malformed_arguments_are_errors() {
        assert!(mock_value(&json!(5)).is_err());
        assert!(mock_value(&Value::Null).is_err());
        assert!(mock_value(&json!(["number", -1])).is_err());
        assert!(mock_value(&json!([])).is_err());
    }
}
