//! Constrained JSONPath-style extraction.
//!
//! Supported grammar: an optional leading `$` or `$.`, then `.`-separated
//! segments. Each segment is a field name optionally followed by `[n]`,
//! where `n` is a non-negative integer. A trailing `[*]` on the whole path
//! marks array mode; it is stripped before resolution and the array at that
//! position is returned as-is.
//!
//! Extraction never fails. Missing keys, type mismatches and bad indices all
//! resolve to `None`.

use serde_json::Value;

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;

/// Marker that selects array mode when it ends a path.
pub const WILDCARD_SUFFIX: &str = "[*]";

/// A path expression borrowed from the mapping configuration.
///
/// The expression is not validated up front; malformed parts simply fail to
/// resolve when [`PathExpr::extract`] walks them.
///
/// # Examples
///
/// ```rust
/// use json_mapper_core::PathExpr;
/// use serde_json::json;
///
/// let source = json!({"orders": [{"id": "A"}, {"id": "B"}]});
///
/// assert_eq!(PathExpr::new("$.orders[1].id").extract(&source), Some(&json!("B")));
/// assert_eq!(PathExpr::new("$.orders[5]").extract(&source), None);
///
/// let wildcard = PathExpr::new("$.orders[*]");
/// assert!(wildcard.has_wildcard_suffix());
/// assert!(wildcard.extract(&source).unwrap().is_array());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathExpr<'a>(&'a str);

impl<'a> PathExpr<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Whether the whole expression ends with `[*]`.
    pub fn has_wildcard_suffix(&self) -> bool {
        self.0.ends_with(WILDCARD_SUFFIX)
    }

    /// Resolves the expression against `root`.
    pub fn extract<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let path = self.0.strip_suffix(WILDCARD_SUFFIX).unwrap_or(self.0);
        let path = normalize(path);

        if path.is_empty() {
            return Some(root);
        }

        let mut segments: Vec<&str> = path.split('.').collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        segments
            .into_iter()
            .try_fold(root, |current, segment| resolve_segment(current, segment))
    }
}

impl<'a> From<&'a str> for PathExpr<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for PathExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Extracts the value at `path` from `root`.
///
/// Shorthand for `PathExpr::new(path).extract(root)`.
pub fn extract<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    PathExpr::new(path).extract(root)
}

fn normalize(path: &str) -> &str {
    path.strip_prefix("$.")
        .or_else(|| path.strip_prefix('$'))
        .unwrap_or(path)
}

fn resolve_segment<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    match (segment.find('['), segment.find(']')) {
        (Some(open), Some(close)) => resolve_indexed(current, segment, open, close),
        _ => current.as_object()?.get(segment),
    }
}

/// Resolves `field[n]`; an empty `field` indexes the current value itself.
fn resolve_indexed<'v>(
    current: &'v Value,
    segment: &str,
    open: usize,
    close: usize,
) -> Option<&'v Value> {
    if close < open {
        return None;
    }

    let field = &segment[..open];
    let array = if field.is_empty() {
        current
    } else {
        current.as_object()?.get(field)?
    };

    let index: usize = segment[open + 1..close].parse().ok()?;
    array.as_array()?.get(index)
}
