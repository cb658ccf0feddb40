use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by the template store.
///
/// These cover lookups of unknown templates, invalid registrations and
/// failures while loading template files from disk.
#[derive(Error, Debug)]
pub enum Error {
    /// No template with the given name has been registered.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template name was empty or consisted only of whitespace.
    #[error("Invalid template name: '{0}'")]
    InvalidTemplateName(String),

    /// I/O operation failed while reading template files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A template file contains invalid UTF-8 sequences.
    #[error("Invalid UTF-8 content in file: {0}")]
    InvalidUtf8(String),
}

/// Errors that can occur while rendering a template.
///
/// The variants are independent of the engine that produced them so that
/// any [`crate::TemplateRenderer`] implementation can report failures the
/// same way.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Template compilation failed due to syntax errors.
    ///
    /// # Examples
    ///
    /// - `{{#if unclosed block`
    /// - `{{invalid.}}`
    #[error("Template compilation failed: {message}")]
    CompilationError {
        /// Detailed error message from the template parser
        message: String,
    },

    /// Template rendering failed during execution.
    #[error("Template rendering failed: {message}")]
    RenderError {
        /// Detailed error message from the renderer
        message: String,
    },

    /// A variable referenced by the template is missing and the engine
    /// runs in strict mode.
    #[error("Variable validation failed: {variable} - {reason}")]
    VariableValidation {
        /// Name of the variable that failed validation
        variable: String,
        /// Specific validation failure reason
        reason: String,
    },

    /// A custom helper failed during execution.
    #[error("Helper error: {helper} - {message}")]
    HelperError {
        /// Name of the helper that failed
        helper: String,
        /// Error message from helper execution
        message: String,
    },

    /// Template processing exceeded a configured resource limit.
    #[error("Resource limit exceeded: {limit_type} - {message}")]
    ResourceLimit {
        /// Type of resource limit that was exceeded
        limit_type: String,
        /// Detailed message about the limit violation
        message: String,
    },
}
