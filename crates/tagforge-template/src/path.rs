//! Dotted-path resolution over JSON data.
//!
//! Paths like `user.profile.name` are walked one segment at a time through
//! objects (by key) and arrays (by numeric index). Absence is expressed as
//! `None`, never as an error; every caller treats it as "render nothing".

use serde_json::Value;

/// Resolves a dotted path against nested data.
///
/// Returns `None` as soon as any intermediate value is not indexable, or
/// when the final segment is absent.
///
/// ```rust
/// use tagforge_template::resolve;
/// use serde_json::json;
///
/// let data = json!({"user": {"name": "Ana"}, "items": ["a", "b"]});
/// assert_eq!(resolve("user.name", &data), Some(&json!("Ana")));
/// assert_eq!(resolve("items.1", &data), Some(&json!("b")));
/// assert_eq!(resolve("user.missing", &data), None);
/// assert_eq!(resolve("user.name.deeper", &data), None);
/// ```
pub fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Host-language truthiness: `null`, `false`, `0` and `""` are falsy,
/// everything else (including empty arrays and objects) is truthy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Textual form of a value for interpolation.
///
/// Strings render without quotes, numbers and booleans via their display
/// form, `null` as the empty string, arrays and objects as compact JSON.
pub fn textualize(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
