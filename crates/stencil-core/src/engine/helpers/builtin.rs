use serde_json::Value;

use crate::domain::{case, value};
use crate::engine::error::HelperError;

pub(super) fn camel_case(arg: &Value) -> Result<String, HelperError> {
    scalar_text("camelCase", arg).map(|s| case::to_camel_case(&s))
}

pub(super) fn pascal_case(arg: &Value) -> Result<String, HelperError> {
    scalar_text("pascalCase", arg).map(|s| case::to_pascal_case(&s))
}

pub(super) fn kebab_case(arg: &Value) -> Result<String, HelperError> {
    scalar_text("kebabCase", arg).map(|s| case::to_kebab_case(&s))
}

pub(super) fn snake_case(arg: &Value) -> Result<String, HelperError> {
    scalar_text("snakeCase", arg).map(|s| case::to_snake_case(&s))
}

/// Pretty-printed JSON, two-space indent.
pub(super) fn json(arg: &Value) -> Result<String, HelperError> {
    Ok(serde_json::to_string_pretty(arg)?)
}

fn scalar_text(helper: &str, arg: &Value) -> Result<String, HelperError> {
    match arg {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(value::stringify(arg)),
        other => Err(HelperError::InvalidArgument {
            helper: helper.to_string(),
            expected: "a string, number or boolean",
            found: value::kind_of(other).to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn case_helpers_accept_scalars() {
        assert_eq!(pascal_case(&json!("user-profile")).unwrap(), "UserProfile");
        assert_eq!(kebab_case(&json!("UserProfile")).unwrap(), "user-profile");
        assert_eq!(snake_case(&json!("firstName")).unwrap(), "first_name");
        assert_eq!(camel_case(&json!("first_name")).unwrap(), "firstName");
        assert_eq!(kebab_case(&json!(42)).unwrap(), "42");
        assert_eq!(pascal_case(&json!(true)).unwrap(), "True");
    }

    #[test]
    fn case_helpers_reject_structured_values() {
        let err = camel_case(&json!({"a": 1})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "camelCase expects a string, number or boolean, got an object"
        );
        assert!(matches!(
            kebab_case(&Value::Null),
            Err(HelperError::InvalidArgument { .. })
        ));
        assert!(snake_case(&json!(["a"])).is_err());
    }

    #[test]
    fn json_is_pretty_printed() {
        assert_eq!(json(&json!({"a": [1, 2]})).unwrap(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
        assert_eq!(json(&json!("x")).unwrap(), "\"x\"");
        assert_eq!(json(&Value::Null).unwrap(), "null");
    }
}
