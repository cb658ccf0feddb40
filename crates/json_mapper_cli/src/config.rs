//! Configuration management for the json-mapper CLI.
//!
//! The configuration controls which templates are available to a
//! transformation and how they are rendered. It is stored in TOML format and
//! can be loaded from a specified file path or from the default location in
//! the current directory.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! template_dir = "templates"
//! include_builtin_templates = true
//!
//! [render]
//! strict_variables = false
//! escape_html = true
//! trim_output = true
//!
//! [templates]
//! GREETING = "Hi {{name}}"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use json_mapper_core::StructureMapper;
use serde::{Deserialize, Serialize};
use template_engine::{HandlebarsTemplateEngine, TemplateRegistry, TemplateRenderConfig};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "json-mapper.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the json-mapper CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory whose `*.hbs` / `*.mustache` files are registered as
    /// templates under their file stem. Relative paths are resolved against
    /// the directory containing the configuration file.
    pub template_dir: Option<PathBuf>,

    /// Whether the built-in templates (`ORDER_DETAIL`, `USER_SUMMARY`,
    /// `SETTINGS_INFO`) are registered before any others.
    pub include_builtin_templates: bool,

    /// Rendering behaviour.
    pub render: RenderSettings,

    /// Inline templates, by name. These are registered last and replace
    /// templates of the same name from other sources.
    pub templates: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            include_builtin_templates: true,
            render: RenderSettings::default(),
            templates: BTreeMap::new(),
        }
    }
}

/// Rendering switches exposed in the `[render]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub strict_variables: bool,
    pub escape_html: bool,
    pub trim_output: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let defaults = TemplateRenderConfig::default();
        Self {
            strict_variables: defaults.strict_variables,
            escape_html: defaults.escape_html,
            trim_output: defaults.trim_output,
        }
    }
}

impl From<&RenderSettings> for TemplateRenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        TemplateRenderConfig {
            strict_variables: settings.strict_variables,
            escape_html: settings.escape_html,
            trim_output: settings.trim_output,
            ..TemplateRenderConfig::default()
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// A relative `template_dir` is rewritten to be relative to the
    /// directory containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let mut config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        if let (Some(dir), Some(base)) = (&config.template_dir, path.parent()) {
            if dir.is_relative() {
                config.template_dir = Some(base.join(dir));
            }
        }

        Ok(config)
    }

    /// Loads the configuration named on the command line, or the default
    /// file in the current directory.
    ///
    /// An explicitly named file must exist. When no file is named and the
    /// default file is absent, the built-in defaults are used.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, Error> {
        match config_path {
            Some(path) => Self::load(path),
            None => {
                let default_path = get_config_path(None);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Saves the configuration to a TOML file, creating parent directories
    /// as needed.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Builds the template store described by this configuration.
    ///
    /// Templates are registered in order: built-ins, then the template
    /// directory, then inline templates.
    pub fn build_registry(&self) -> Result<TemplateRegistry, Error> {
        let registry = if self.include_builtin_templates {
            TemplateRegistry::with_defaults()
        } else {
            TemplateRegistry::new()
        };

        if let Some(dir) = &self.template_dir {
            registry.load_directory(dir)?;
        }

        for (name, content) in &self.templates {
            registry.register(name.as_str(), content.as_str())?;
        }

        debug!(templates = registry.len(), "Template store ready");
        Ok(registry)
    }

    /// Builds a mapper with this configuration's templates and render
    /// settings.
    pub fn build_mapper(&self) -> Result<StructureMapper, Error> {
        let registry = self.build_registry()?;
        let engine = HandlebarsTemplateEngine::with_config((&self.render).into());

        Ok(StructureMapper::with_parts(Arc::new(registry), Arc::new(engine)))
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path
/// - Otherwise returns `./json-mapper.toml` in the current directory
pub fn get_config_path(config_path: Option<&Path>) -> PathBuf {
    if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
