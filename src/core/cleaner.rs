//! Structural cleaner — prunes unspecified branches before serialization.
//!
//! `null` and empty containers collapse to `None` and bubble upward.
//! Empty strings, `false`, and `0` are real values and are kept.

use serde_json::{Map, Value};

/// Recursively strip `null` values and empty containers from `value`.
///
/// Returns `None` when nothing is left, in which case the caller should drop
/// the key holding `value` entirely. Array order is preserved and duplicates
/// are kept. The input is never modified.
pub fn clean(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        Value::Object(fields) => {
            let cleaned: Map<String, Value> = fields
                .iter()
                .filter_map(|(key, field)| clean(field).map(|v| (key.clone(), v)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        other => Some(other.clone()),
    }
}
