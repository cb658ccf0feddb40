//! Template Engine for json-mapper
//!
//! This crate provides the two template collaborators used by the mapping
//! core: a renderer that turns a template and a [`TemplateContext`] into text,
//! and a [`TemplateRegistry`] that stores templates by name.
//!
//! The renderer is expressed as the [`TemplateRenderer`] trait so the engine
//! can be swapped; [`HandlebarsTemplateEngine`] is the default implementation.

mod context;
mod errors;
mod handlebars_engine;
mod registry;
mod sections;

pub use context::TemplateContext;
pub use errors::{Error, RenderError};
pub use handlebars_engine::{HandlebarsTemplateEngine, TemplateRenderConfig};
pub use registry::{TemplateRegistry, TEMPLATE_FILE_EXTENSIONS};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Renders template content against a [`TemplateContext`].
///
/// Implementations must support variable interpolation (`{{name}}`), dotted
/// lookup into nested values (`{{source2.name}}`) and mustache-style section
/// semantics where missing or falsy values render nothing.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &TemplateContext) -> Result<String, RenderError>;
}
