//! JSON Mapper Core
//!
//! This crate transforms a source JSON tree into a new target tree, guided by
//! a declarative mapping configuration. Each configured key names an
//! extraction path into the source and what to do with the extracted value:
//! copy it verbatim (`COPY`) or render it through a named template
//! (`MUSTACHE`), optionally combining several sources into one rendering.
//!
//! ## Data Flow
//!
//! ```text
//! raw config ──parse──▶ MappingConfiguration
//!                              │
//! source ──▶ MappingEngine ────┤ per rule
//!                              ▼
//!                      MapperDispatcher ──▶ PathExpr::extract
//!                              │
//!                              ├──▶ context::{single_source, multi_source}
//!                              ▼
//!                      TemplateRegistry + TemplateRenderer
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use json_mapper_core::StructureMapper;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), json_mapper_core::Error> {
//! let mapper = StructureMapper::new();
//! mapper.register_template("ORDER_BY", "{{id}} by {{source2.name}}")?;
//!
//! let source = json!({"orders": [{"id": "X"}], "user": {"name": "Ann"}});
//! let config = json!({
//!     "lines": {
//!         "mapperType": "MUSTACHE",
//!         "templateName": "ORDER_BY",
//!         "jsonPath": ["$.orders[*]", "$.user"]
//!     }
//! });
//!
//! let output = mapper.transform(&source, &config)?;
//! assert_eq!(output, json!({"lines": ["X by Ann"]}));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Value;
use template_engine::{HandlebarsTemplateEngine, TemplateRegistry, TemplateRenderer};
use tracing::info;

pub mod context;
pub mod dispatcher;
pub mod engine;
mod errors;
pub mod mapping;
pub mod path;

pub use dispatcher::MapperDispatcher;
pub use engine::MappingEngine;
pub use errors::{Error, Result};
pub use mapping::{MapperType, MappingConfiguration, MappingNode, MappingRule};
pub use path::{extract, PathExpr};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Entry point that owns the template store and renderer.
///
/// The mapper itself holds no per-call state: every transformation parses its
/// configuration fresh and builds its output locally. It can be shared across
/// threads; only template registration touches shared state.
#[derive(Clone)]
pub struct StructureMapper {
    registry: Arc<TemplateRegistry>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl std::fmt::Debug for StructureMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureMapper")
            .field("registry", &self.registry)
            .field("renderer", &"Arc<dyn TemplateRenderer>")
            .finish()
    }
}

impl Default for StructureMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureMapper {
    /// Creates a mapper with an empty template store and the default
    /// Handlebars renderer.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(TemplateRegistry::new()),
            Arc::new(HandlebarsTemplateEngine::new()),
        )
    }

    /// Creates a mapper whose store is seeded with the built-in templates.
    pub fn with_defaults() -> Self {
        Self::with_parts(
            Arc::new(TemplateRegistry::with_defaults()),
            Arc::new(HandlebarsTemplateEngine::new()),
        )
    }

    pub fn with_parts(
        registry: Arc<TemplateRegistry>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self { registry, renderer }
    }

    pub fn registry(&self) -> &Arc<TemplateRegistry> {
        &self.registry
    }

    /// Adds or replaces a named template.
    pub fn register_template(&self, name: &str, content: &str) -> Result<()> {
        self.registry.register(name, content)?;
        Ok(())
    }

    /// Transforms `source` according to the raw mapping configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Configuration`: the configuration is malformed
    /// - `Error::TemplateNotFound`: a rule references an unknown template
    /// - `Error::NotImplemented`: the configuration contains a `TRANSFORM` rule
    /// - `Error::Render`: the renderer failed
    pub fn transform(&self, source: &Value, mapping: &Value) -> Result<Value> {
        let config = MappingConfiguration::parse(mapping)?;

        let dispatcher = MapperDispatcher::new(&self.registry, self.renderer.as_ref());
        let target = MappingEngine::new(dispatcher).process(source, &config)?;

        info!(
            rules = config.rule_count(),
            output_keys = target.len(),
            "Transformation complete"
        );
        Ok(Value::Object(target))
    }

    /// Transforms JSON text and returns pretty-printed JSON text.
    pub fn transform_json_structure(&self, source_json: &str, mapping: &Value) -> Result<String> {
        let source: Value = serde_json::from_str(source_json)?;
        let target = self.transform(&source, mapping)?;
        Ok(serde_json::to_string_pretty(&target)?)
    }
}
