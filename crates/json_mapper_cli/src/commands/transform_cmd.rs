//! The `transform` command.
//!
//! Reads a source document and a mapping configuration, applies the mapping
//! and writes the resulting document as pretty-printed JSON.
//!
//! # Examples
//!
//! ```bash
//! # Transform a file, writing to stdout
//! json-mapper transform --source order.json --mapping mapping.json
//!
//! # Read the source from stdin and write to a file
//! cat order.json | json-mapper transform --source - --mapping mapping.json --output out.json
//! ```

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::Args;
use json_mapper_core::StructureMapper;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "transform_cmd_tests.rs"]
mod tests;

/// Marker used in place of a file path to read the source from stdin.
pub const STDIN_MARKER: &str = "-";

/// Command-line arguments for the transform command.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Source JSON document, or `-` to read it from stdin.
    #[arg(long)]
    pub source: String,

    /// Mapping configuration (JSON) describing the target structure.
    #[arg(long)]
    pub mapping: PathBuf,

    /// Path to a TOML configuration file. Defaults to `./json-mapper.toml`
    /// when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

/// Runs the transform command.
#[instrument(skip(args), fields(source = %args.source, mapping = ?args.mapping))]
pub fn execute(args: &TransformArgs) -> Result<(), Error> {
    if args.mapping.as_path() == Path::new(STDIN_MARKER) {
        return Err(Error::InvalidArguments(
            "only --source can be read from stdin".to_string(),
        ));
    }

    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let mapper = config.build_mapper()?;

    let source = if args.source == STDIN_MARKER {
        read_json(STDIN_MARKER, io::stdin().lock())?
    } else {
        read_json_file(Path::new(&args.source))?
    };
    let mapping = read_json_file(&args.mapping)?;

    let rendered = transform_to_string(&mapper, &source, &mapping, args.compact)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n")).map_err(Error::WriteOutput)?;
            info!(output = ?path, "Result written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(Error::WriteOutput)?;
        }
    }

    Ok(())
}

/// Applies `mapping` to `source` and serializes the result.
pub fn transform_to_string(
    mapper: &StructureMapper,
    source: &Value,
    mapping: &Value,
    compact: bool,
) -> Result<String, Error> {
    let target = mapper.transform(source, mapping)?;

    let text = if compact {
        serde_json::to_string(&target)
    } else {
        serde_json::to_string_pretty(&target)
    };
    text.map_err(|e| Error::Mapping(e.into()))
}

/// Reads and parses a JSON file.
pub fn read_json_file(path: &Path) -> Result<Value, Error> {
    let label = path.display().to_string();
    let file = fs::File::open(path).map_err(|source| Error::ReadInput {
        path: label.clone(),
        source,
    })?;
    read_json(&label, file)
}

/// Reads a complete JSON document from `reader`. `label` names the input in
/// error messages.
pub fn read_json<R: Read>(label: &str, mut reader: R) -> Result<Value, Error> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| Error::ReadInput {
            path: label.to_string(),
            source,
        })?;

    debug!(input = label, bytes = text.len(), "Input read");

    serde_json::from_str(&text).map_err(|source| Error::ParseJson {
        path: label.to_string(),
        source,
    })
}
