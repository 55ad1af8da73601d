//! Auxiliary key-value bundles
//!
//! Controllers attach loosely-typed extras to playback states, to metadata
//! and to the session itself. The dispatcher never interprets them; it only
//! hands them to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single extras value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        ExtraValue::Bool(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        ExtraValue::Int(value)
    }
}

impl From<i32> for ExtraValue {
    fn from(value: i32) -> Self {
        ExtraValue::Int(i64::from(value))
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        ExtraValue::Float(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::Text(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::Text(value)
    }
}

/// Ordered key-value bundle
///
/// # Example
///
/// ```rust
/// use session_model::Extras;
///
/// let extras = Extras::new()
///     .with("queue_title", "Morning Mix")
///     .with("shuffle", true);
///
/// assert_eq!(extras.get_str("queue_title"), Some("Morning Mix"));
/// assert_eq!(extras.get_bool("shuffle"), Some(true));
/// assert_eq!(extras.get_int("shuffle"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras(BTreeMap<String, ExtraValue>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ExtraValue>,
    ) -> Option<ExtraValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            ExtraValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            ExtraValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float lookup; integer values are widened
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            ExtraValue::Float(value) => Some(*value),
            ExtraValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            ExtraValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> FromIterator<(K, V)> for Extras {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters_reject_other_types() {
        let extras = Extras::new().with("count", 3).with("name", "radio");

        assert_eq!(extras.get_int("count"), Some(3));
        assert_eq!(extras.get_str("count"), None);
        assert_eq!(extras.get_str("name"), Some("radio"));
        assert_eq!(extras.get_bool("missing"), None);
    }

    #[test]
    fn test_float_widens_ints() {
        let extras = Extras::new().with("speed", 1.5).with("steps", 2);
        assert_eq!(extras.get_float("speed"), Some(1.5));
        assert_eq!(extras.get_float("steps"), Some(2.0));
    }

    #[test]
    fn test_insert_replaces() {
        let mut extras = Extras::new();
        assert!(extras.insert("k", true).is_none());
        assert_eq!(extras.insert("k", false), Some(ExtraValue::Bool(true)));
        assert_eq!(extras.len(), 1);
    }

    #[test]
    fn test_iteration_is_ordered_by_key() {
        let extras: Extras = vec![("b", 2), ("a", 1)].into_iter().collect();
        let keys: Vec<&str> = extras.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let extras = Extras::new().with("live", true).with("channel", "news");
        let json = serde_json::to_string(&extras).unwrap();
        assert_eq!(json, r#"{"channel":"news","live":true}"#);
    }
}
