use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the json-mapper CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing the TOML
    /// configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadInput {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An input file does not contain valid JSON.
    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The result could not be written.
    #[error("Failed to write output: {0}")]
    WriteOutput(io::Error),

    /// The transformation itself failed.
    #[error(transparent)]
    Mapping(#[from] json_mapper_core::Error),

    /// Templates could not be loaded into the template store.
    #[error("Template loading failed: {0}")]
    Templates(#[from] template_engine::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// `1` for configuration, template and transformation failures, `2` for
    /// I/O and argument problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Mapping(_) | Error::Templates(_) => 1,
            Error::InvalidArguments(_)
            | Error::ReadInput { .. }
            | Error::ParseJson { .. }
            | Error::WriteOutput(_) => 2,
        }
    }
}
