//! Template context assembly.
//!
//! The primary source (the first path) is spliced into the top level of the
//! context, so its fields are reachable unprefixed (`{{name}}`). Each further
//! source `paths[i]` is nested under `source{i+1}` (`{{source2.name}}`).
//! Scalars are exposed under the synthetic key `value` in both cases.

use serde_json::{Map, Value};
use template_engine::TemplateContext;

use crate::path::PathExpr;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Context key under which scalar sources are exposed.
pub const VALUE_KEY: &str = "value";

/// Prefix of the context keys that hold secondary sources.
pub const SECONDARY_SOURCE_PREFIX: &str = "source";

/// Context key for the source at `index` (0-based) when it is not primary.
pub fn secondary_source_key(index: usize) -> String {
    format!("{SECONDARY_SOURCE_PREFIX}{}", index + 1)
}

/// Builds the context for a single extracted value.
///
/// Objects become the top-level context; anything else is exposed as
/// `{{value}}`.
pub fn single_source(data: &Value) -> TemplateContext {
    let mut context = TemplateContext::new();
    add_primary(&mut context, data);
    context
}

/// Builds a context from several paths resolved against `source`.
///
/// When `current_item` is given (array mode) it replaces the extraction of
/// `paths[0]`. Secondary paths are always resolved against the full `source`,
/// never against `current_item`. Paths that do not resolve contribute
/// nothing.
pub fn multi_source<S: AsRef<str>>(
    source: &Value,
    paths: &[S],
    current_item: Option<&Value>,
) -> TemplateContext {
    let mut context = TemplateContext::new();

    for (index, path) in paths.iter().enumerate() {
        let data = match (index, current_item) {
            (0, Some(item)) => Some(item),
            _ => PathExpr::new(path.as_ref()).extract(source),
        };

        let Some(data) = data else {
            continue;
        };

        if index == 0 {
            add_primary(&mut context, data);
        } else {
            add_secondary(&mut context, data, index);
        }
    }

    context
}

fn add_primary(context: &mut TemplateContext, data: &Value) {
    match data {
        Value::Object(fields) => context.extend_from_object(fields),
        other => context.insert(VALUE_KEY, other.clone()),
    }
}

fn add_secondary(context: &mut TemplateContext, data: &Value, index: usize) {
    let nested = match data {
        Value::Object(_) => data.clone(),
        other => {
            let mut wrapped = Map::new();
            wrapped.insert(VALUE_KEY.to_string(), other.clone());
            Value::Object(wrapped)
        }
    };

    context.insert(secondary_source_key(index), nested);
}
