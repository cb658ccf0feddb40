//! Rendering context handed to a [`crate::TemplateRenderer`].
//!
//! A [`TemplateContext`] is a plain ordered key/value map. It carries no
//! knowledge of where its values came from; callers assemble it and the
//! engine reads it through its `Serialize` implementation.

use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Ordered variables available to a single template rendering.
///
/// ## Examples
///
/// ```rust
/// use template_engine::TemplateContext;
/// use serde_json::json;
///
/// let mut context = TemplateContext::new();
/// context.insert("name", json!("Ann"));
/// context.insert("source2", json!({"city": "Oslo"}));
///
/// assert_eq!(context.len(), 2);
/// assert_eq!(context.get("name"), Some(&json!("Ann")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext {
    variables: Map<String, Value>,
}

impl TemplateContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a variable, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.variables.insert(key.into(), value);
    }

    /// Splices every field of `object` into the top level of the context.
    ///
    /// Fields keep the order they have in `object`; a field whose key is
    /// already present overwrites the earlier value.
    pub fn extend_from_object(&mut self, object: &Map<String, Value>) {
        for (key, value) in object {
            self.variables.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over the variables in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.variables.keys()
    }

    /// Borrows the underlying ordered map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Converts the context into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.variables)
    }
}

impl From<Map<String, Value>> for TemplateContext {
    fn from(variables: Map<String, Value>) -> Self {
        Self { variables }
    }
}
