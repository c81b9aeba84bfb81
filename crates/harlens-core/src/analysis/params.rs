use super::{FrequencyMap, count};
use serde_json::Value;

/// Count the parameter names found in a request body.
///
/// Classification goes by the body's shape, not its declared MIME type:
/// a JSON object is flattened into dotted/indexed names, otherwise a body
/// containing both `=` and `&` is split as form data. Anything else is ignored.
pub fn extract_body_parameters(body: &str, counts: &mut FrequencyMap) {
    if let Ok(json @ Value::Object(_)) = serde_json::from_str::<Value>(body) {
        flatten_json_keys(&json, "", counts);
        return;
    }

    if body.contains('=') && body.contains('&') {
        for pair in body.split('&') {
            if let Some((key, _)) = pair.split_once('=') {
                count(counts, key);
            }
        }
    }
}

/// Walk a JSON value, counting every name that doesn't itself hold an array.
///
/// Object members become `parent.key`, array elements `parent[i]`; a member
/// holding an array is only counted through its indexed elements.
fn flatten_json_keys(value: &Value, prefix: &str, counts: &mut FrequencyMap) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                if !child.is_array() {
                    count(counts, full_key.as_str());
                }
                flatten_json_keys(child, &full_key, counts);
            }
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                let index_key = format!("{}[{}]", prefix, idx);
                if !item.is_array() {
                    count(counts, index_key.as_str());
                }
                flatten_json_keys(item, &index_key, counts);
            }
        }
        _ => {}
    }
}
