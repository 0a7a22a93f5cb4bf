//! Error types for schema and document loading
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors produced while loading schema or document files.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported or undetectable file format
    #[error("unsupported file format for '{path}': expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A `$`-prefixed name the compiler does not know
    #[error("unknown schema directive '{directive}'")]
    UnknownDirective { directive: String },

    /// A known directive with a malformed body
    #[error("invalid schema directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },
}

impl LoaderError {
    /// An I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// A YAML parse error with path context.
    pub fn yaml_parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::YamlParse {
            path: path.into(),
            source,
        }
    }

    /// A JSON parse error with path context.
    pub fn json_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source,
        }
    }

    /// An unsupported-format error for `path`.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// An invalid-directive error.
    pub fn invalid_directive(directive: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDirective {
            directive: directive.into(),
            reason: reason.into(),
        }
    }
}
