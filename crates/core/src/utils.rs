//! Helpers shared by the filters.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\[.\]]+").expect("valid regex"));

/// Substitute `default` when a filter receives no value.
///
/// Template hosts pass `null`, `undefined` and `false` for missing values;
/// all of them map to `None` before reaching this function.
pub fn normalize<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// [`normalize`] for host values: `null` and `false` take the default too.
pub fn normalize_value(value: &Value, default: Value) -> Value {
    match value {
        Value::Null | Value::Bool(false) => default,
        other => other.clone(),
    }
}

/// Whether a host value counts as false in a template condition.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Bool(true) => false,
    }
}

/// Split a path such as `user.tags[0]` into its segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    PATH_SEGMENT.find_iter(path).map(|m| m.as_str()).collect()
}

/// Look up the value at `path` inside `value`.
///
/// Objects are indexed by key and arrays by position. Lookup stops at the
/// first falsy value along the way and returns it. `None` means the path
/// does not resolve; an empty path never resolves.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    get_segments(value, &path_segments(path))
}

/// [`get`] with the path already split into keys.
pub fn get_segments<'a, S: AsRef<str>>(value: &'a Value, segments: &[S]) -> Option<&'a Value> {
    if segments.is_empty() {
        return None;
    }

    let mut current = value;
    for segment in segments {
        if is_falsy(current) {
            return Some(current);
        }
        let key = segment.as_ref();
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// [`get`] returning `default` when the path does not resolve.
pub fn get_or<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(value, path).unwrap_or(default)
}

/// Render a scalar host value the way a template prints it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
