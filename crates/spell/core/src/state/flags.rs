//! Author-owned progress flags.

use serde_json::{Map, Value};

/// Mutable key/value store that requirement predicates read and hooks write.
///
/// Values are arbitrary JSON so authors can keep counters, booleans or
/// small records (e.g. `"door_key_collected": true`, `"attempts": 3`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryFlags {
    values: Map<String, Value>,
}

impl StoryFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true only for a stored boolean `true`.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Adds `by` to an integer flag, treating a missing or non-integer flag as 0.
    pub fn increment(&mut self, name: &str, by: i64) -> i64 {
        let current = self.values.get(name).and_then(Value::as_i64).unwrap_or(0);
        let next = current.saturating_add(by);
        self.values.insert(name.to_string(), Value::from(next));
        next
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for StoryFlags {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}
