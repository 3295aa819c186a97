//! Dot-path access into nested JSON objects (`"subject.hair.style"`).

use serde_json::{Map, Value};

/// Look up a nested value by dot path. Returns `None` when any segment is
/// missing or an intermediate value is not an object.
pub fn get_nested<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}

/// Set a nested value by dot path, creating intermediate objects as needed.
/// Intermediate values that are not objects are replaced.
pub fn set_nested(target: &mut Value, path: &str, value: Value) {
    let mut parts: Vec<&str> = path.split('.').collect();
    let last = parts.pop().unwrap_or_default();

    let mut current = target;
    for part in parts {
        current = ensure_object(current)
            .entry(part.to_string())
            .or_insert(Value::Null);
    }
    ensure_object(current).insert(last.to_string(), value);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Deep-merge `overlay` onto `base`, returning a new value.
///
/// Objects merge key by key. Any other overlay value replaces the base value,
/// except `null`, which leaves the base untouched.
pub fn merge_values(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let next = match merged.get(key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, Value::Null) => base.clone(),
        _ => overlay.clone(),
    }
}
