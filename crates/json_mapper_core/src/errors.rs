use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a transformation.
///
/// Path resolution problems are never reported here; an extraction that does
/// not resolve simply produces no output for its key. Every variant below
/// terminates the whole transformation call without partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// The mapping configuration is malformed.
    ///
    /// Raised while parsing the configuration, before any extraction runs:
    /// an entry is neither a rule nor a nested object, a rule has an unknown
    /// `mapperType`, a `MUSTACHE` rule has no `templateName`, or `jsonPath`
    /// is not a string or an array of strings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A rule references a template that is not in the template store.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A rule uses a mapper type that has no implementation (`TRANSFORM`).
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The template renderer failed.
    #[error("Failed to render template '{template}': {source}")]
    Render {
        /// Name of the template being rendered
        template: String,
        /// Error reported by the renderer
        #[source]
        source: template_engine::RenderError,
    },

    /// The template store rejected an operation.
    #[error("Template store error: {0}")]
    TemplateStore(template_engine::Error),

    /// JSON text could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<template_engine::Error> for Error {
    fn from(error: template_engine::Error) -> Self {
        match error {
            template_engine::Error::TemplateNotFound(name) => Error::TemplateNotFound(name),
            other => Error::TemplateStore(other),
        }
    }
}

/// Result alias used throughout the mapping core.
pub type Result<T> = std::result::Result<T, Error>;
