//! Conforma Core - runtime structural validation for JSON and YAML data
//!
//! This crate decides, at runtime, whether an untrusted value conforms to a
//! *schema descriptor* - a value whose own shape determines its validation
//! semantics - and optionally transforms the value on the way through. On
//! mismatch it produces a precise, composable error trail that survives
//! arbitrary nesting depth without losing provenance.
//!
//! ## Features
//!
//! - **Shape-directed dispatch**: literals, kind checks, predicates,
//!   conversions, containers, and mappings all validate by what they are
//! - **Combinator algebra**: `And` pipelines, `Or` alternatives, `Optional`
//!   key markers compose to arbitrary depth
//! - **Conversions**: `Convert` descriptors replace the value on success,
//!   so validation doubles as coercion
//! - **Structured failures**: every failure carries the full auto-generated
//!   diagnostic chain plus any user-supplied override texts
//! - **File loading**: JSON and YAML schema/document loading with a compact
//!   directive vocabulary (`$int`, `$or`, `$regex`, ...)
//!
//! ## Quick Start
//!
//! ```rust
//! use conforma_core::{all, check, map, optional, Schema, ValueKind};
//! use serde_json::json;
//!
//! let schema = Schema::new(map([
//!     ("host".into(), ValueKind::String.into()),
//!     (
//!         optional("port"),
//!         all([
//!             ValueKind::Int.into(),
//!             check("valid_port", |v| v.as_i64().map(|n| (1..=65535).contains(&n)).unwrap_or(false)),
//!         ]),
//!     ),
//! ]));
//!
//! let config = json!({"host": "localhost", "port": 8080});
//! assert_eq!(schema.validate(&config).unwrap(), config);
//!
//! let failure = schema.validate(&json!({"host": "localhost", "port": 0})).unwrap_err();
//! assert_eq!(
//!     failure.message(),
//!     "key 'port' error:\nvalid_port(0) should evaluate to true"
//! );
//! ```
//!
//! ## Error display convention
//!
//! When a failure chain carries user-supplied custom error texts, the
//! outermost non-empty one is the combined display string; otherwise the
//! auto-generated diagnostics are joined with newlines, outermost first.
//! The full chains stay available through
//! [`ValidationFailure::autos`] and [`ValidationFailure::custom_errors`].
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod descriptor;
mod engine;
pub mod error;
pub mod kind;
pub mod loader;
pub mod schema;

// Re-export the working surface for convenience
pub use descriptor::{
    all, any_of, check, check_fallible, convert, convert_fallible, literal, map, optional, seq,
    Converter, Descriptor, Predicate, Validate,
};
pub use error::{ValidationFailure, ValidationResult};
pub use kind::ValueKind;
pub use loader::{compile, load_document, load_schema, Format, LoaderError, LoaderResult, SchemaParser};
pub use schema::{validate, Schema};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_one_shot_validate() {
        assert_eq!(validate(ValueKind::Int, &json!(3)).unwrap(), json!(3));
        assert!(validate(ValueKind::Int, &json!("3")).is_err());
    }
}
