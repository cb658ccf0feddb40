//! Per-rule processing.
//!
//! [`MapperDispatcher`] takes one parsed [`MappingRule`] and produces the
//! value to write under the rule's target key, or `None` when the rule
//! yields nothing.

use serde_json::Value;
use template_engine::{TemplateContext, TemplateRegistry, TemplateRenderer};
use tracing::{debug, warn};

use crate::context;
use crate::mapping::{MapperType, MappingRule};
use crate::{Error, Result};

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

/// Applies mapping rules using a template store and a renderer.
pub struct MapperDispatcher<'a> {
    registry: &'a TemplateRegistry,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> MapperDispatcher<'a> {
    pub fn new(registry: &'a TemplateRegistry, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Applies `rule` to `source`.
    ///
    /// # Returns
    ///
    /// - `COPY`: the value at the primary path, or `None` when it is absent.
    /// - `MUSTACHE`: the rendered string, an array of rendered strings in
    ///   array mode, or `None` when the primary source does not resolve.
    ///
    /// # Errors
    ///
    /// - `Error::NotImplemented`: the rule is a `TRANSFORM` rule
    /// - `Error::TemplateNotFound`: the rule's template is not registered
    /// - `Error::Render`: the renderer failed
    pub fn dispatch(&self, rule: &MappingRule, source: &Value) -> Result<Option<Value>> {
        debug!(
            mapper_type = %rule.mapper_type(),
            paths = ?rule.paths(),
            "Dispatching mapping rule"
        );

        match rule.mapper_type() {
            MapperType::Copy => Ok(rule.primary_path().extract(source).cloned()),
            MapperType::Mustache => self.apply_template(rule, source),
            MapperType::Transform => Err(Error::NotImplemented(
                "TRANSFORM mapper not implemented yet".to_string(),
            )),
        }
    }

    fn apply_template(&self, rule: &MappingRule, source: &Value) -> Result<Option<Value>> {
        let template_name = rule.template_name().ok_or_else(|| {
            Error::Configuration("templateName is required for MUSTACHE mapping".to_string())
        })?;

        let primary = rule.primary_path();
        let extracted = primary.extract(source);

        if rule.is_array_mode() {
            let Some(extracted) = extracted else {
                return Ok(None);
            };
            let Some(items) = extracted.as_array() else {
                warn!(
                    path = %primary,
                    "Wildcard path did not resolve to an array, skipping rule"
                );
                return Ok(None);
            };

            return self
                .render_array(template_name, rule, source, items)
                .map(Some);
        }

        let context = if rule.has_multiple_sources() {
            context::multi_source(source, rule.paths(), None)
        } else {
            match extracted {
                Some(data) => context::single_source(data),
                None => return Ok(None),
            }
        };

        let template = self.registry.get(template_name)?;
        let rendered = self.render(template_name, &template, &context)?;
        Ok(Some(Value::String(rendered)))
    }

    /// Renders the template once per element, preserving element order.
    fn render_array(
        &self,
        template_name: &str,
        rule: &MappingRule,
        source: &Value,
        items: &[Value],
    ) -> Result<Value> {
        if items.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        let template = self.registry.get(template_name)?;

        let rendered = items
            .iter()
            .map(|item| {
                let context = if rule.has_multiple_sources() {
                    context::multi_source(source, rule.paths(), Some(item))
                } else {
                    context::single_source(item)
                };
                self.render(template_name, &template, &context)
                    .map(Value::String)
            })
            .collect::<Result<Vec<Value>>>()?;

        debug!(
            template = template_name,
            elements = rendered.len(),
            "Rendered template in array mode"
        );
        Ok(Value::Array(rendered))
    }

    fn render(
        &self,
        template_name: &str,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String> {
        self.renderer
            .render(template, context)
            .map_err(|source| Error::Render {
                template: template_name.to_string(),
                source,
            })
    }
}
