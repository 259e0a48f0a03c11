//! Purpose: Locate the first value bound to a key anywhere in a JSON report tree.
//! Exports: `find_key`, `find_key_skipping_null`.
//! Role: Pure search core used by summary building; no I/O, no logging.
//! Invariants: Depth-first pre-order; the first match wins and short-circuits.
//! Invariants: Object entries are visited in document order (`preserve_order`).
//! Invariants: Arrays bind keys via `"key", value` pairs; nested arrays are not searched.
use serde_json::Value;

/// Returns the value bound to `target`, or `None` when no binding exists.
///
/// A present `null` is returned as `Some(&Value::Null)`.
pub fn find_key<'a>(tree: &'a Value, target: &str) -> Option<&'a Value> {
    match tree {
        Value::Object(map) => {
            for (key, value) in map {
                if key == target {
                    return Some(value);
                }
                if let Some(found) = find_key(value, target) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) => {
                        if let Some(found) = find_key(item, target) {
                            return Some(found);
                        }
                    }
                    Value::String(marker) if marker == target => {
                        if let Some(next) = items.get(idx + 1) {
                            return Some(next);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Like `find_key`, but a binding to `null` counts as no binding.
///
/// A `null` hit ends the scan of the object or array holding it, and the
/// enclosing levels keep scanning their remaining entries.
pub fn find_key_skipping_null<'a>(tree: &'a Value, target: &str) -> Option<&'a Value> {
    match tree {
        Value::Object(map) => {
            for (key, value) in map {
                if key == target {
                    return non_null(value);
                }
                if let Some(found) = find_key_skipping_null(value, target) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) => {
                        if let Some(found) = find_key_skipping_null(item, target) {
                            return Some(found);
                        }
                    }
                    Value::String(marker) if marker == target => {
                        if let Some(next) = items.get(idx + 1) {
                            return non_null(next);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

fn non_null(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}
