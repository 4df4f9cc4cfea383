//! Read-only view over the editor settings object.

use serde_json::Value;

use crate::error::{BlockError, BlockResult};

/// Nested editor settings, as handed over by the settings store.
///
/// Lookups never fail: a missing key anywhere along a path is `None`.
/// A JSON `null` is a present value and is returned as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree(Value);

impl ConfigTree {
    /// Wrap an already decoded settings value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decode settings from a JSON object string
    pub fn from_json(json: &str) -> BlockResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| BlockError::invalid_json("settings", e))?;
        if !value.is_object() {
            return Err(BlockError::NotAnObject { what: "settings" });
        }
        Ok(Self(value))
    }

    /// Underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level field of the settings object
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a dot-separated path, e.g. `color.palette`
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.lookup(path.split('.'))
    }

    /// Look up a path given as individual segments.
    ///
    /// Numeric segments index into arrays.
    pub fn lookup<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Option<&Value> {
        let mut current = &self.0;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl From<Value> for ConfigTree {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// JavaScript truthiness of a settings value.
///
/// `null`, `false`, `0` and `""` are falsy; arrays and objects are always
/// truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_paths() {
        let config = ConfigTree::new(json!({
            "color": { "palette": [ { "slug": "red" }, { "slug": "blue" } ] },
            "empty": null
        }));

        assert_eq!(config.get("color.palette.1.slug"), Some(&json!("blue")));
        assert_eq!(config.get("color.palette.2.slug"), None);
        assert_eq!(config.get("color.missing.deeper"), None);
        assert_eq!(config.get("color.palette.first"), None);
        assert_eq!(config.get("empty"), Some(&Value::Null));
        assert_eq!(config.get("empty.x"), None);
        assert_eq!(config.get(""), None);
    }

    #[test]
    fn test_from_json() {
        let config = ConfigTree::from_json(r#"{"colors": []}"#).unwrap();
        assert_eq!(config.field("colors"), Some(&json!([])));

        assert!(matches!(
            ConfigTree::from_json("[1, 2]"),
            Err(BlockError::NotAnObject { what: "settings" })
        ));
        assert!(matches!(
            ConfigTree::from_json("{"),
            Err(BlockError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
