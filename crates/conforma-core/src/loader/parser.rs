//! File parsing for YAML and JSON schema and document files
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path)),
            },
            None => Err(LoaderError::unsupported_format(path)),
        }
    }
}

/// Parser that reads either format into a [`serde_json::Value`].
///
/// YAML content is parsed with `serde_yaml` first to surface YAML-specific
/// errors, then converted to a JSON value for uniform downstream handling.
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from its extension.
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|source| LoaderError::io(path, source))?;
        self.parse_content(&content, format, path)
    }

    /// Parse content with an explicit format.
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content.
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|source| LoaderError::yaml_parse(path, source))?;
        serde_json::to_value(yaml_value).map_err(|source| LoaderError::json_parse(path, source))
    }

    /// Parse JSON content.
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|source| LoaderError::json_parse(path, source))
    }

    /// Parse content trying the extension's format first, then JSON (the
    /// stricter grammar), then YAML. Used for files without a recognized
    /// extension.
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }
        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }
        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }
        Err(LoaderError::unsupported_format(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("s.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("s.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("s.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("s.toml")).is_err());
        assert!(Format::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn test_parse_json_content() {
        let parser = SchemaParser::new();
        let value = parser
            .parse_json(r#"{"host": "$string"}"#, Path::new("s.json"))
            .unwrap();
        assert_eq!(value, json!({"host": "$string"}));
    }

    #[test]
    fn test_parse_yaml_content() {
        let parser = SchemaParser::new();
        let value = parser
            .parse_yaml("host: $string\nport: $int\n", Path::new("s.yaml"))
            .unwrap();
        assert_eq!(value, json!({"host": "$string", "port": "$int"}));
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let parser = SchemaParser::new();
        let error = parser
            .parse_json("{not json", Path::new("bad.json"))
            .unwrap_err();
        assert!(error.to_string().contains("bad.json"));
    }

    #[test]
    fn test_fallback_prefers_json() {
        let parser = SchemaParser::new();
        let (value, format) = parser
            .parse_with_fallback(r#"{"a": 1}"#, &PathBuf::from("schema"))
            .unwrap();
        assert_eq!(format, Format::Json);
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_fallback_accepts_yaml() {
        let parser = SchemaParser::new();
        let (value, format) = parser
            .parse_with_fallback("a: 1\nb: two\n", &PathBuf::from("schema"))
            .unwrap();
        assert_eq!(format, Format::Yaml);
        assert_eq!(value, json!({"a": 1, "b": "two"}));
    }
}
