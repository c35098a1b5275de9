//! Transient parameter mapping for action invocations.
//!
//! A [`Params`] value is built once per invocation (for web requests, by
//! merging body, query-string, and route-parameter sources) and threaded
//! through the lifecycle hooks. Nothing persists beyond a single call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed parameter map passed through an action's lifecycle.
///
/// Thin newtype over [`serde_json::Map`] so hooks can treat parameters as
/// plain JSON. Iteration visits keys in sorted order.
///
/// # Examples
///
/// ```
/// use entity_controller_core::Params;
///
/// let mut params = Params::new();
/// params.insert("name", "widget");
/// params.insert("count", 3);
///
/// assert_eq!(params.get_str("name"), Some("widget"));
/// assert_eq!(params.get_i64("count"), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build params from a JSON value, returning `None` unless it is an
    /// object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Insert a parameter, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a parameter by key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Look up a parameter by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string parameter by key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Look up an integer parameter by key.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Look up a boolean parameter by key.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Whether a parameter with the given key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge another parameter map into this one. Keys from `other` win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterate over parameter entries.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Consume the map and return the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Self::Object(params.0)
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_getters() {
        let mut params = Params::new();
        params.insert("name", "widget");
        params.insert("count", 3);
        params.insert("active", true);

        assert_eq!(params.get_str("name"), Some("widget"));
        assert_eq!(params.get_i64("count"), Some(3));
        assert_eq!(params.get_bool("active"), Some(true));
        assert_eq!(params.get_str("count"), None);
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base = Params::from_value(json!({"a": 1, "b": 2})).unwrap();
        let overlay = Params::from_value(json!({"b": 3, "c": 4})).unwrap();

        base.merge(overlay);

        assert_eq!(base.get_i64("a"), Some(1));
        assert_eq!(base.get_i64("b"), Some(3));
        assert_eq!(base.get_i64("c"), Some(4));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Params::from_value(json!([1, 2])).is_none());
        assert!(Params::from_value(json!("text")).is_none());
        assert!(Params::from_value(json!({"k": "v"})).is_some());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut params = Params::new();
        assert!(params.insert("k", 1).is_none());
        assert_eq!(params.insert("k", 2), Some(json!(1)));
        assert_eq!(params.get_i64("k"), Some(2));
    }

    #[test]
    fn test_iteration_is_key_sorted() {
        let mut params = Params::new();
        params.insert("z", 1);
        params.insert("a", 2);
        params.insert("m", 3);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_serde_transparent() {
        let params = Params::from_value(json!({"k": "v"})).unwrap();
        let serialized = serde_json::to_value(&params).unwrap();
        assert_eq!(serialized, json!({"k": "v"}));

        let roundtrip: Params = serde_json::from_value(serialized).unwrap();
        assert_eq!(roundtrip, params);
    }
}
