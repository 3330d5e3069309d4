use serde_json::Value;

/// Shallow merge of two JSON objects; keys in `updates` win. Non-object
/// inputs resolve to `updates`.
pub fn merge_json(base: &Value, updates: &Value) -> Value {
    match (base, updates) {
        (Value::Object(a), Value::Object(b)) => {
            let mut merged = a.clone();
            for (k, v) in b {
                merged.insert(k.clone(), v.clone());
            }
            Value::Object(merged)
        }
        _ => updates.clone(),
    }
}

/// Render a JSON value as display text. Strings are shown without quotes,
/// `null` as an empty string, everything else in compact JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Read `field` from a JSON object. Missing fields and `null` both yield
/// `None`; non-objects never match.
pub fn field<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.as_object()?.get(field).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_json_preserves_unknown_fields() {
        let base = json!({"known": 1, "extra": {"keep": true}});
        let updates = json!({"known": 2});
        let merged = merge_json(&base, &updates);
        assert_eq!(merged["known"], json!(2));
        assert_eq!(merged["extra"], json!({"keep": true}));
    }

    #[test]
    fn text_rendering_strips_string_quotes() {
        assert_eq!(value_to_text(&json!("up")), "up");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!(null)), "");
        assert_eq!(value_to_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn field_skips_null_and_non_objects() {
        let doc = json!({"a": null, "b": 2});
        assert_eq!(field(&doc, "a"), None);
        assert_eq!(field(&doc, "b"), Some(&json!(2)));
        assert_eq!(field(&json!([1, 2]), "0"), None);
    }
}
