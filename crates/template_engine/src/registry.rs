//! Named template storage.
//!
//! The [`TemplateRegistry`] is the only state shared between transformation
//! calls. Reads happen on every template rendering, writes only through the
//! explicit registration methods, so the map sits behind a `RwLock`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::Error;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// File extensions recognized by [`TemplateRegistry::load_directory`].
pub const TEMPLATE_FILE_EXTENSIONS: &[&str] = &["hbs", "mustache"];

const ORDER_DETAIL: &str = "Order ID: {{orderId}}
Product: {{productName}} ({{quantity}}x)
Price: ${{price}}
Status: {{status}}
";

const USER_SUMMARY: &str = "{{name}} ({{email}})
Age: {{profile.age}}, Location: {{profile.location}}
";

const SETTINGS_INFO: &str = "Theme: {{theme}}, Notifications: {{notifications}}
";

/// Thread-safe store mapping template names to template content.
///
/// # Examples
///
/// ```rust
/// use template_engine::TemplateRegistry;
///
/// let registry = TemplateRegistry::new();
/// registry.register("GREETING", "Hi {{name}}").unwrap();
///
/// assert_eq!(registry.get("GREETING").unwrap(), "Hi {{name}}");
/// assert!(registry.remove("GREETING"));
/// assert!(registry.get("GREETING").is_err());
/// ```
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<HashMap<String, String>>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the built-in templates
    /// `ORDER_DETAIL`, `USER_SUMMARY` and `SETTINGS_INFO`.
    pub fn with_defaults() -> Self {
        let mut templates = HashMap::new();
        templates.insert("ORDER_DETAIL".to_string(), ORDER_DETAIL.to_string());
        templates.insert("USER_SUMMARY".to_string(), USER_SUMMARY.to_string());
        templates.insert("SETTINGS_INFO".to_string(), SETTINGS_INFO.to_string());

        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Adds a template, replacing any existing template with the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTemplateName` when `name` is empty or blank.
    pub fn register(
        &self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidTemplateName(name));
        }

        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let replaced = templates.insert(name.clone(), content.into()).is_some();

        debug!(template = %name, replaced, "Template registered");
        Ok(())
    }

    /// Returns a copy of the named template's content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateNotFound` when no template has that name.
    pub fn get(&self, name: &str) -> Result<String, Error> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Removes a template, returning whether it was present.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();

        if removed {
            debug!(template = %name, "Template removed");
        }
        removed
    }

    /// Returns the registered template names in sorted order.
    pub fn names(&self) -> BTreeSet<String> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers every template file found directly inside `dir`.
    ///
    /// Files with one of the [`TEMPLATE_FILE_EXTENSIONS`] are registered under
    /// their file stem (`greeting.hbs` becomes `greeting`). Other files and
    /// subdirectories are ignored.
    ///
    /// # Returns
    ///
    /// The number of templates registered.
    ///
    /// # Errors
    ///
    /// - `Error::Io`: the directory or a template file cannot be read
    /// - `Error::InvalidUtf8`: a template file is not valid UTF-8
    pub fn load_directory(&self, dir: &Path) -> Result<usize, Error> {
        let mut loaded = 0;

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_template = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEMPLATE_FILE_EXTENSIONS.contains(&ext));
            if !is_template {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let bytes = std::fs::read(path)?;
            let content = String::from_utf8(bytes)
                .map_err(|_| Error::InvalidUtf8(path.display().to_string()))?;

            self.register(name, content)?;
            loaded += 1;
        }

        info!(directory = %dir.display(), loaded, "Loaded templates from directory");
        Ok(loaded)
    }
}
