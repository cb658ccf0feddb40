//! Mapping configuration model.
//!
//! A raw configuration is a JSON object whose entries are either rules
//! (objects carrying a `mapperType` key) or nested blocks (any other object).
//! [`MappingConfiguration::parse`] turns it into a typed tree once, before
//! any extraction work, so the engine never has to inspect raw shapes.
//!
//! ```json
//! {
//!   "client": {
//!     "orders":   {"mapperType": "MUSTACHE", "templateName": "ORDER_DETAIL", "jsonPath": "$.orders[*]"},
//!     "settings": {"mapperType": "COPY", "jsonPath": "$.settings"}
//!   }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::path::PathExpr;
use crate::{Error, Result};

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;

/// Key that marks a configuration object as a rule.
pub const MAPPER_TYPE_KEY: &str = "mapperType";

/// Key holding the template name of a `MUSTACHE` rule.
pub const TEMPLATE_NAME_KEY: &str = "templateName";

/// Key holding one path expression or an array of them.
pub const JSON_PATH_KEY: &str = "jsonPath";

/// The kind of processing a rule applies to its extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapperType {
    /// Copy the extracted value through unchanged.
    Copy,
    /// Render the extracted value(s) through a named template.
    Mustache,
    /// Reserved for custom transformations; never executes successfully.
    Transform,
}

impl MapperType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapperType::Copy => "COPY",
            MapperType::Mustache => "MUSTACHE",
            MapperType::Transform => "TRANSFORM",
        }
    }
}

impl fmt::Display for MapperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapperType {
    type Err = Error;

    /// Parses a mapper type name case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "COPY" => Ok(MapperType::Copy),
            "MUSTACHE" => Ok(MapperType::Mustache),
            "TRANSFORM" => Ok(MapperType::Transform),
            _ => Err(Error::Configuration(format!(
                "unknown {MAPPER_TYPE_KEY} '{s}', expected one of COPY, MUSTACHE, TRANSFORM"
            ))),
        }
    }
}

/// A single validated mapping rule.
///
/// `paths` is never empty. `template_name` is always present for
/// [`MapperType::Mustache`] rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    mapper_type: MapperType,
    template_name: Option<String>,
    paths: Vec<String>,
}

impl MappingRule {
    /// Builds a rule, enforcing the rule invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` when `paths` is empty or a `MUSTACHE`
    /// rule has no template name.
    pub fn new(
        mapper_type: MapperType,
        template_name: Option<String>,
        paths: Vec<String>,
    ) -> Result<Self> {
        if paths.is_empty() {
            return Err(Error::Configuration(format!(
                "{JSON_PATH_KEY} must contain at least one path"
            )));
        }

        if mapper_type == MapperType::Mustache && template_name.is_none() {
            return Err(Error::Configuration(format!(
                "{TEMPLATE_NAME_KEY} is required for MUSTACHE mapping"
            )));
        }

        Ok(Self {
            mapper_type,
            template_name,
            paths,
        })
    }

    /// Shorthand for a `COPY` rule with a single path.
    pub fn copy(path: impl Into<String>) -> Self {
        Self {
            mapper_type: MapperType::Copy,
            template_name: None,
            paths: vec![path.into()],
        }
    }

    /// Shorthand for a `MUSTACHE` rule over one or more paths.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` when `paths` is empty.
    pub fn mustache<I, S>(template_name: impl Into<String>, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            MapperType::Mustache,
            Some(template_name.into()),
            paths.into_iter().map(Into::into).collect(),
        )
    }

    pub fn mapper_type(&self) -> MapperType {
        self.mapper_type
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The first path; the only one a `COPY` rule uses.
    pub fn primary_path(&self) -> PathExpr<'_> {
        PathExpr::new(&self.paths[0])
    }

    pub fn has_multiple_sources(&self) -> bool {
        self.paths.len() > 1
    }

    /// Whether the primary path ends with the `[*]` wildcard suffix.
    pub fn is_array_mode(&self) -> bool {
        self.primary_path().has_wildcard_suffix()
    }
}

/// One entry of a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingNode {
    Rule(MappingRule),
    Nested(MappingConfiguration),
}

/// A parsed mapping configuration: ordered target keys and what to put there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingConfiguration {
    entries: Vec<(String, MappingNode)>,
}

impl MappingConfiguration {
    /// Parses and validates a raw configuration object.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` when the root is not an object, or when
    /// any entry anywhere in the tree is malformed. The message names the
    /// dotted key path of the offending entry.
    pub fn parse(raw: &Value) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            Error::Configuration(format!(
                "mapping configuration must be an object, found {}",
                value_kind(raw)
            ))
        })?;

        Self::parse_object(object, "")
    }

    fn parse_object(object: &Map<String, Value>, prefix: &str) -> Result<Self> {
        let mut entries = Vec::with_capacity(object.len());

        for (key, value) in object {
            let key_path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            let node = match value {
                Value::Object(fields) if fields.contains_key(MAPPER_TYPE_KEY) => {
                    MappingNode::Rule(parse_rule(fields).map_err(|e| at_key(&key_path, e))?)
                }
                Value::Object(fields) => {
                    MappingNode::Nested(Self::parse_object(fields, &key_path)?)
                }
                other => {
                    return Err(Error::Configuration(format!(
                        "{key_path}: expected a mapping rule or nested object, found {}",
                        value_kind(other)
                    )))
                }
            };

            entries.push((key.clone(), node));
        }

        Ok(Self { entries })
    }

    /// Builds a configuration from already-typed entries.
    pub fn from_entries(entries: Vec<(String, MappingNode)>) -> Self {
        Self { entries }
    }

    /// Iterates over the entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts the rules in this configuration and all nested blocks.
    pub fn rule_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                MappingNode::Rule(_) => 1,
                MappingNode::Nested(nested) => nested.rule_count(),
            })
            .sum()
    }
}

fn parse_rule(fields: &Map<String, Value>) -> Result<MappingRule> {
    let mapper_type = match fields.get(MAPPER_TYPE_KEY) {
        Some(Value::String(name)) => name.parse::<MapperType>()?,
        Some(other) => {
            return Err(Error::Configuration(format!(
                "{MAPPER_TYPE_KEY} must be a string, found {}",
                value_kind(other)
            )))
        }
        None => {
            return Err(Error::Configuration(format!(
                "missing {MAPPER_TYPE_KEY}"
            )))
        }
    };

    let template_name = match fields.get(TEMPLATE_NAME_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(other) => {
            return Err(Error::Configuration(format!(
                "{TEMPLATE_NAME_KEY} must be a string, found {}",
                value_kind(other)
            )))
        }
    };

    let paths = parse_paths(fields.get(JSON_PATH_KEY))?;

    MappingRule::new(mapper_type, template_name, paths)
}

/// Accepts a single path string or an array of path strings.
fn parse_paths(value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        Some(Value::String(path)) => Ok(vec![path.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::Configuration(format!(
                        "{JSON_PATH_KEY} array must contain only strings, found {}",
                        value_kind(item)
                    ))
                })
            })
            .collect(),
        Some(other) => Err(Error::Configuration(format!(
            "{JSON_PATH_KEY} must be either a string or an array of strings, found {}",
            value_kind(other)
        ))),
        None => Err(Error::Configuration(format!("missing {JSON_PATH_KEY}"))),
    }
}

fn at_key(key_path: &str, error: Error) -> Error {
    match error {
        Error::Configuration(message) => Error::Configuration(format!("{key_path}: {message}")),
        other => other,
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
