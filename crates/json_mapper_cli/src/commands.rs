//! Command modules for the json-mapper CLI.
//!
//! - `transform_cmd`: Apply a mapping configuration to a source document
//! - `templates_cmd`: List the templates a configuration makes available

pub mod templates_cmd;
pub mod transform_cmd;
