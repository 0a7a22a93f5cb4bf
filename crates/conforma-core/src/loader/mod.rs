//! Loading schemas and documents from JSON and YAML files
//!
//! The loader is glue around the engine: it parses a file into a
//! [`serde_json::Value`](serde_json::Value) and, for schema files, compiles
//! that value into a [`Descriptor`](crate::Descriptor). See
//! [`compile`](compile::compile) for the schema-file conventions.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod compile;
pub mod error;
pub mod parser;

pub use compile::compile;
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};

use crate::schema::Schema;
use serde_json::Value;
use std::path::Path;

/// Load and compile a schema file into a ready-to-use [`Schema`].
pub fn load_schema(path: &Path) -> LoaderResult<Schema> {
    let parser = SchemaParser::new();
    let document = parser.parse_file(path)?;
    Ok(Schema::new(compile(&document)?))
}

/// Load a document file to validate.
///
/// Files without a recognized extension are parsed with a JSON-then-YAML
/// fallback.
pub fn load_document(path: &Path) -> LoaderResult<Value> {
    let parser = SchemaParser::new();
    match Format::from_path(path) {
        Ok(_) => parser.parse_file(path),
        Err(_) => {
            let content =
                std::fs::read_to_string(path).map_err(|source| LoaderError::io(path, source))?;
            parser.parse_with_fallback(&content, path).map(|(value, _)| value)
        }
    }
}
