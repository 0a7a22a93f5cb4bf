//! Root schema wrapper and the public validation entry point
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{Descriptor, Validate};
use crate::engine::validate_descriptor;
use crate::error::ValidationResult;
use serde_json::Value;

/// An entry point around any schema descriptor.
///
/// Wrapping is transparent: validating through the wrapper yields the same
/// result as dispatching the inner descriptor directly, except that a custom
/// error text set with [`with_error`](Schema::with_error) substitutes the
/// user-facing message on failure (the auto-generated chain is preserved
/// underneath for diagnostics).
///
/// Construction validates nothing; all work is deferred to
/// [`validate`](Schema::validate). A schema is immutable and reusable across
/// any number of validations.
///
/// # Examples
///
/// ```rust
/// use conforma_core::{map, optional, Schema, ValueKind};
/// use serde_json::json;
///
/// let schema = Schema::new(map([
///     ("host".into(), ValueKind::String.into()),
///     (optional("port"), ValueKind::Int.into()),
/// ]));
///
/// let validated = schema.validate(&json!({"host": "localhost"})).unwrap();
/// assert_eq!(validated, json!({"host": "localhost"}));
/// assert!(schema.validate(&json!({"port": 80})).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    descriptor: Descriptor,
    error: Option<String>,
}

impl Schema {
    /// Wrap a descriptor.
    pub fn new(descriptor: impl Into<Descriptor>) -> Self {
        Self {
            descriptor: descriptor.into(),
            error: None,
        }
    }

    /// Attach a custom error text reported in place of the auto-generated
    /// headline when validation fails anywhere beneath this wrapper.
    #[must_use]
    pub fn with_error(mut self, text: impl Into<String>) -> Self {
        self.error = Some(text.into());
        self
    }

    /// The wrapped descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Validate `value`, returning the validated (possibly converted) value
    /// or a structured failure carrying the whole context path.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        validate_descriptor(&self.descriptor, value, self.error.as_deref())
    }

    /// Boolean convenience over [`validate`](Schema::validate).
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

impl Validate for Schema {
    fn validate(&self, value: &Value) -> ValidationResult<Value> {
        Schema::validate(self, value)
    }

    fn describe(&self) -> String {
        self.descriptor.to_string()
    }
}

/// Validate `value` against `schema` in one call.
///
/// This is the functional spelling of [`Schema::validate`] for one-shot use;
/// anything convertible into a [`Descriptor`] is accepted.
pub fn validate(schema: impl Into<Descriptor>, value: &Value) -> ValidationResult<Value> {
    Schema::new(schema).validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{all, check, map};
    use crate::kind::ValueKind;
    use serde_json::json;

    #[test]
    fn test_wrapper_is_transparent() {
        let descriptor = Descriptor::Kind(ValueKind::Int);
        let through_wrapper = Schema::new(descriptor.clone()).validate(&json!(5));
        let direct = validate(descriptor, &json!(5));
        assert_eq!(through_wrapper.unwrap(), direct.unwrap());
    }

    #[test]
    fn test_custom_error_substitutes_display() {
        let schema = Schema::new(all([
            ValueKind::Int.into(),
            check("positive", |value| value.as_i64().map(|n| n > 0).unwrap_or(false)),
        ]))
        .with_error("must be positive");

        let failure = schema.validate(&json!(-1)).unwrap_err();
        assert_eq!(failure.message(), "must be positive");
        assert_eq!(
            failure.autos()[0].as_deref(),
            Some("positive(-1) should evaluate to true")
        );
    }

    #[test]
    fn test_schemas_nest_as_descriptors() {
        let port = Schema::new(ValueKind::Int).with_error("port must be an integer");
        let schema = Schema::new(map([("port".into(), port.into())]));

        assert!(schema.is_valid(&json!({"port": 80})));
        let failure = schema.validate(&json!({"port": "x"})).unwrap_err();
        // the inner schema's custom text is the outermost non-empty override
        assert_eq!(failure.message(), "port must be an integer");
    }

    #[test]
    fn test_construction_defers_validation() {
        // building a schema around a faulting predicate is fine until used
        let schema = Schema::new(check("always_false", |_| false));
        assert!(!schema.is_valid(&json!(1)));
    }

    #[test]
    fn test_is_valid() {
        let schema = Schema::new(ValueKind::String);
        assert!(schema.is_valid(&json!("x")));
        assert!(!schema.is_valid(&json!(1)));
    }
}
