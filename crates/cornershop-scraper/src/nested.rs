//! Safe traversal of optional-field chains in untyped JSON.
//!
//! Search responses nest every value of interest several objects deep and
//! any link of the chain may be absent or `null`. These helpers return
//! `None` as soon as a step cannot be taken.

use serde_json::Value;

/// Follows `keys` from `root`, returning the value at the end of the path.
///
/// Returns `None` the instant a step is missing, `null`, or not an object.
/// A `null` at the final step is also reported as `None`.
#[must_use]
pub fn get_nested<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(root, |current, key| current.as_object()?.get(*key))
        .filter(|v| !v.is_null())
}

/// Text at `keys`. Numbers and booleans are rendered to their JSON text so
/// identifiers typed either way end up identical.
#[must_use]
pub fn get_text(root: &Value, keys: &[&str]) -> Option<String> {
    match get_nested(root, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Number at `keys`. Numeric strings such as `"5.50"` are accepted.
#[must_use]
pub fn get_f64(root: &Value, keys: &[&str]) -> Option<f64> {
    match get_nested(root, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Array at `keys`, or an empty slice when absent or not an array.
#[must_use]
pub fn get_array<'a>(root: &'a Value, keys: &[&str]) -> &'a [Value] {
    get_nested(root, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
