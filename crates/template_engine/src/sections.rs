//! Mustache section support on top of Handlebars.
//!
//! Handlebars only knows block helpers, so a mustache section such as
//! `{{#items}}..{{/items}}` or `{{^flag}}..{{/flag}}` is rewritten before
//! compilation into an `{{#each}}` over a helper that computes the section's
//! iterations:
//!
//! ```text
//! {{#name}}body{{/name}}  ->  {{#each (__mustache_section name this)}}body{{/each}}
//! {{^name}}body{{/name}}  ->  {{#each (__mustache_inverted name this)}}body{{/each}}
//! ```
//!
//! Falsy values (`null`, `false`, `0`, `""`, `[]`) render nothing, arrays
//! render once per element, and any other value renders once. Object scopes
//! are layered over the enclosing scope so names from outside the section
//! still resolve inside it. Handlebars blocks (`{{#if x}}`, `{{#each xs}}`)
//! pass through untouched.

use std::borrow::Cow;

use handlebars::handlebars_helper;
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "sections_tests.rs"]
mod tests;

pub(crate) const SECTION_HELPER: &str = "__mustache_section";
pub(crate) const INVERTED_HELPER: &str = "__mustache_inverted";

/// Block helpers that Handlebars provides itself, plus the ones this engine
/// registers. A `{{#name}}` tag naming one of these is never a section.
const HANDLEBARS_BLOCKS: &[&str] = &[
    "if",
    "unless",
    "each",
    "with",
    "lookup",
    "log",
    "upper_case",
    "lower_case",
    "capitalize",
    "default",
];

handlebars_helper!(mustache_section: |value: Json, scope: Json| section_items(value, scope));
handlebars_helper!(mustache_inverted: |value: Json, scope: Json| inverted_items(value, scope));

/// Returns whether `value` opens a mustache section.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// The scopes a `{{#name}}` section is rendered with, one per iteration.
pub(crate) fn section_items(value: &Value, scope: &Value) -> Value {
    if !is_truthy(value) {
        return Value::Array(Vec::new());
    }

    match value {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| layered(scope, item)).collect())
        }
        Value::Object(_) => Value::Array(vec![layered(scope, value)]),
        _ => Value::Array(vec![scope.clone()]),
    }
}

/// The scopes a `{{^name}}` section is rendered with: the enclosing scope
/// once when `value` is falsy, nothing otherwise.
pub(crate) fn inverted_items(value: &Value, scope: &Value) -> Value {
    if is_truthy(value) {
        Value::Array(Vec::new())
    } else {
        Value::Array(vec![scope.clone()])
    }
}

/// Overlays an object `item` on an object `scope`. Anything else is returned
/// as-is so scalar elements stay reachable as `{{.}}`.
fn layered(scope: &Value, item: &Value) -> Value {
    match (scope, item) {
        (Value::Object(outer), Value::Object(inner)) => {
            let mut merged: Map<String, Value> = outer.clone();
            for (key, value) in inner {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => item.clone(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum OpenBlock {
    Section(String),
    Handlebars(String),
}

/// Rewrites mustache sections and `{{.}}` into Handlebars syntax. Templates
/// without either are returned unchanged.
pub(crate) fn to_handlebars(template: &str) -> Cow<'_, str> {
    if !template.contains("{{#") && !template.contains("{{^") && !template.contains(".}}") {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len() + 64);
    let mut open: Vec<OpenBlock> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let content = &after_open[..end];
        out.push_str(&rewrite_tag(content, &mut open));
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Rewrites one tag's inner text (between `{{` and `}}`) and returns the
/// complete replacement tag.
fn rewrite_tag(content: &str, open: &mut Vec<OpenBlock>) -> String {
    let (lead, body) = match content.strip_prefix('~') {
        Some(stripped) => ("~", stripped),
        None => ("", content),
    };
    let (body, trail) = match body.strip_suffix('~') {
        Some(stripped) => (stripped, "~"),
        None => (body, ""),
    };
    let tag = |inner: String| format!("{{{{{lead}{inner}{trail}}}}}");

    match body.trim() {
        "." => return tag("this".to_string()),
        "{." => return tag("{this".to_string()),
        _ => {}
    }

    if let Some(name) = body.strip_prefix('#') {
        let name = name.trim();
        if is_section_name(name) {
            open.push(OpenBlock::Section(name.to_string()));
            return tag(format!("#each ({SECTION_HELPER} {name} this)"));
        }
        let helper = name
            .trim_start_matches(&['*', '>'][..])
            .split_whitespace()
            .next()
            .unwrap_or_default();
        open.push(OpenBlock::Handlebars(helper.to_string()));
    } else if let Some(name) = body.strip_prefix('^') {
        let name = name.trim();
        if is_section_name(name) {
            open.push(OpenBlock::Section(name.to_string()));
            return tag(format!("#each ({INVERTED_HELPER} {name} this)"));
        }
    } else if let Some(name) = body.strip_prefix('/') {
        let name = name.trim();
        let closes_section = match open.last() {
            Some(OpenBlock::Section(section)) if section == name => Some(true),
            Some(OpenBlock::Handlebars(helper)) if helper == name => Some(false),
            _ => None,
        };
        if let Some(is_section) = closes_section {
            open.pop();
            if is_section {
                return tag("/each".to_string());
            }
        }
    }

    format!("{{{{{content}}}}}")
}

/// A section name is a single plain path that is not a Handlebars block.
fn is_section_name(name: &str) -> bool {
    !name.is_empty()
        && !HANDLEBARS_BLOCKS.contains(&name)
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$'))
}
