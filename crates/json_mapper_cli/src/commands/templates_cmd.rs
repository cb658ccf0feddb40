//! The `templates` command: lists the templates available to a
//! transformation under the active configuration.
//!
//! ```bash
//! json-mapper templates --config json-mapper.toml --show
//! ```

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Args;
use template_engine::TemplateRegistry;
use tracing::instrument;

use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "templates_cmd_tests.rs"]
mod tests;

/// Command-line arguments for the templates command.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print each template's content below its name.
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

#[instrument(skip(args))]
pub fn execute(args: &TemplatesArgs) -> Result<(), Error> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let registry = config.build_registry()?;

    let listing = format_listing(&registry, args.show)?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{listing}").map_err(Error::WriteOutput)?;
    Ok(())
}

/// Formats the store's templates in name order, one per line.
pub fn format_listing(registry: &TemplateRegistry, show_content: bool) -> Result<String, Error> {
    let names = registry.names();
    if names.is_empty() {
        return Ok("No templates registered\n".to_string());
    }

    let mut out = String::new();
    for name in names {
        out.push_str(&name);
        out.push('\n');
        if show_content {
            let content = registry.get(&name)?;
            for line in content.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    Ok(out)
}
