//! # Handlebars Template Engine
//!
//! This module provides the default [`TemplateRenderer`] implementation, built
//! on the Handlebars templating engine. Mustache sections, which Handlebars
//! does not understand on its own, are rewritten into Handlebars blocks before
//! compilation, so mapping templates written for a mustache renderer keep
//! working:
//!
//! - **Variable Interpolation**: `{{name}}`, HTML-escaped unless disabled
//! - **Dotted Lookup**: `{{source2.name}}`, `{{profile.age}}`
//! - **Sections**: `{{#if notifications}}on{{/if}}`, `{{#each items}}...{{/each}}`
//! - **Mustache Sections**: `{{#items}}..{{/items}}`, `{{#user}}..{{/user}}`
//!   and inverted `{{^flag}}..{{/flag}}` sections
//! - **Falsy Omission**: missing or falsy values render nothing
//!
//! A small set of text helpers (`upper_case`, `lower_case`, `capitalize`,
//! `default`) is registered on every engine.
//!
//! ## Examples
//!
//! ```rust
//! # use template_engine::{HandlebarsTemplateEngine, TemplateContext, TemplateRenderer};
//! # use serde_json::json;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = HandlebarsTemplateEngine::new();
//!
//! let mut context = TemplateContext::new();
//! context.insert("name", json!("Jo"));
//! context.insert("source2", json!({"city": "Oslo"}));
//!
//! let result = engine.render("Hi {{name}} from {{upper_case source2.city}}", &context)?;
//! assert_eq!(result, "Hi Jo from OSLO");
//! # Ok(())
//! # }
//! ```

use handlebars::{Context, Handlebars, Helper, HelperResult, JsonRender, Output, RenderContext};
use tracing::debug;

use crate::{sections, RenderError, TemplateContext, TemplateRenderer};

#[cfg(test)]
#[path = "handlebars_tests.rs"]
mod handlebars_tests;

// ================================
// Custom Handlebars Helpers
// ================================

/// Renders the first helper parameter as text, or an empty string when absent.
fn first_param_text(h: &Helper) -> String {
    h.param(0).map(|v| v.value().render()).unwrap_or_default()
}

fn upper_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&first_param_text(h).to_uppercase())?;
    Ok(())
}

fn lower_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&first_param_text(h).to_lowercase())?;
    Ok(())
}

fn capitalize_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = first_param_text(h);
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    out.write(&capitalized)?;
    Ok(())
}

/// `{{default value "fallback"}}` renders `fallback` when `value` is missing or null.
fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let fallback = h.param(1).map(|v| v.value().render()).unwrap_or_default();

    match h.param(0) {
        Some(val) if !val.value().is_null() => out.write(&val.value().render())?,
        _ => out.write(&fallback)?,
    }

    Ok(())
}

/// Configuration for template rendering behavior.
///
/// The defaults mirror mustache semantics: missing variables render as empty
/// text, interpolated values are HTML-escaped and each rendered string is
/// trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRenderConfig {
    /// Whether to fail on undefined variables (true) or render them as
    /// empty text (false).
    ///
    /// **Default**: `false`
    pub strict_variables: bool,

    /// Whether `{{value}}` interpolations are HTML-escaped.
    ///
    /// Triple-stash `{{{value}}}` is never escaped.
    ///
    /// **Default**: `true`
    pub escape_html: bool,

    /// Whether leading and trailing whitespace is removed from every
    /// rendered string.
    ///
    /// **Default**: `true`
    pub trim_output: bool,

    /// Maximum size of template content in bytes.
    ///
    /// **Default**: 1MB (1,048,576 bytes)
    pub max_template_size: usize,
}

impl Default for TemplateRenderConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            escape_html: true,
            trim_output: true,
            max_template_size: 1_048_576, // 1MB
        }
    }
}

/// Handlebars-backed template renderer.
///
/// The engine holds no per-render state, so a single instance can be shared
/// between threads behind an `Arc` and used for any number of renderings.
pub struct HandlebarsTemplateEngine {
    handlebars: Handlebars<'static>,
    config: TemplateRenderConfig,
}

impl std::fmt::Debug for HandlebarsTemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsTemplateEngine")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for HandlebarsTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlebarsTemplateEngine {
    /// Creates an engine with the default [`TemplateRenderConfig`].
    pub fn new() -> Self {
        Self::with_config(TemplateRenderConfig::default())
    }

    /// Creates an engine with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use template_engine::{HandlebarsTemplateEngine, TemplateRenderConfig};
    ///
    /// let config = TemplateRenderConfig {
    ///     escape_html: false,
    ///     ..Default::default()
    /// };
    ///
    /// let engine = HandlebarsTemplateEngine::with_config(config);
    /// assert!(!engine.config().escape_html);
    /// ```
    pub fn with_config(config: TemplateRenderConfig) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(config.strict_variables);
        if !config.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        handlebars.register_helper("upper_case", Box::new(upper_case_helper));
        handlebars.register_helper("lower_case", Box::new(lower_case_helper));
        handlebars.register_helper("capitalize", Box::new(capitalize_helper));
        handlebars.register_helper("default", Box::new(default_helper));
        handlebars.register_helper(
            sections::SECTION_HELPER,
            Box::new(sections::mustache_section),
        );
        handlebars.register_helper(
            sections::INVERTED_HELPER,
            Box::new(sections::mustache_inverted),
        );

        Self { handlebars, config }
    }

    pub fn config(&self) -> &TemplateRenderConfig {
        &self.config
    }

    /// Renders a template string with the provided context.
    ///
    /// # Errors
    ///
    /// - `RenderError::ResourceLimit`: template exceeds `max_template_size`
    /// - `RenderError::CompilationError`: template syntax is invalid
    /// - `RenderError::VariableValidation`: a variable is missing in strict mode
    /// - `RenderError::RenderError`: any other rendering failure
    pub fn render_template(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, RenderError> {
        if template.len() > self.config.max_template_size {
            return Err(RenderError::ResourceLimit {
                limit_type: "template_size".to_string(),
                message: format!(
                    "Template size {} bytes exceeds limit of {} bytes",
                    template.len(),
                    self.config.max_template_size
                ),
            });
        }

        let template = sections::to_handlebars(template);

        // Syntax errors are reported separately from runtime failures.
        handlebars::Template::compile(&template).map_err(|e| RenderError::CompilationError {
            message: e.to_string(),
        })?;

        let rendered = self
            .handlebars
            .render_template(&template, context)
            .map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.to_lowercase().contains("strict mode") {
                    RenderError::VariableValidation {
                        variable: missing_variable_name(&err_msg),
                        reason: err_msg,
                    }
                } else {
                    RenderError::RenderError { message: err_msg }
                }
            })?;

        debug!(
            template_bytes = template.len(),
            rendered_bytes = rendered.len(),
            "Template rendered"
        );

        if self.config.trim_output {
            Ok(rendered.trim().to_string())
        } else {
            Ok(rendered)
        }
    }
}

impl TemplateRenderer for HandlebarsTemplateEngine {
    fn render(&self, template: &str, context: &TemplateContext) -> Result<String, RenderError> {
        self.render_template(template, context)
    }
}

/// Pulls the quoted variable name out of a strict-mode error message.
fn missing_variable_name(message: &str) -> String {
    message
        .split('"')
        .nth(1)
        .filter(|name| !name.is_empty())
        .unwrap_or("unknown")
        .to_string()
}
