use anyhow::Result;
use figment::providers::Serialized;
use serde::Serialize;
use serde_json::Value;

/// Provider for command line overrides.
///
/// Flags that were not given serialize as `null`, `[]` or `{}`; those are
/// dropped so they cannot mask values from files or the environment.
pub fn cli_provider<T: Serialize>(overrides: T) -> Result<Serialized<Value>> {
    let mut value = serde_json::to_value(overrides)?;
    strip_empty(&mut value);
    Ok(Serialized::defaults(value))
}

fn strip_empty(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for nested in map.values_mut() {
                strip_empty(nested);
            }
            map.retain(|_, v| !is_empty(v));
        }
        Value::Array(items) => items.iter_mut().for_each(strip_empty),
        _ => {}
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_empty() {
        let mut value = json!({
            "output": {"format": null, "pretty": false},
            "input": {"exclude": []},
            "parallel": {"max_threads": 2},
        });
        strip_empty(&mut value);
        assert_eq!(value, json!({"output": {"pretty": false}, "parallel": {"max_threads": 2}}));
    }
}
