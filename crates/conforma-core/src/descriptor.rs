//! Schema descriptors and the combinator algebra
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::error::ValidationResult;
use crate::kind::ValueKind;
use crate::schema::Schema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A value whose shape determines how it validates other values.
///
/// Descriptors form a closed algebra dispatched by exhaustive matching: the
/// engine routes each variant to its matcher, so adding a variant is a
/// compile-time-visible change. Descriptors are immutable after construction
/// and cheap to clone (function variants share their closure through an
/// [`Arc`]), so one descriptor can serve many validations, including from
/// multiple threads.
#[derive(Clone)]
pub enum Descriptor {
    /// Exact-match requirement: input must equal the literal by value
    Literal(Value),
    /// Instance-of requirement over a [`ValueKind`]
    Kind(ValueKind),
    /// Boolean test; a truthy result passes the input through unchanged
    Check(Predicate),
    /// Transformation; the function's return value replaces the input
    Convert(Converter),
    /// Conjunction with pipeline semantics, applied left to right
    And(Vec<Descriptor>),
    /// Disjunction; branches are tried in order against the original value
    Or(Vec<Descriptor>),
    /// Mapping-key marker excluding the wrapped key from coverage accounting
    Optional(Box<Descriptor>),
    /// Container literal: element alternatives for a homogeneous array
    Seq(Vec<Descriptor>),
    /// Mapping literal: ordered (key schema, value schema) associations
    Map(Vec<(Descriptor, Descriptor)>),
    /// A nested object exposing its own validate capability
    Custom(Arc<dyn Validate>),
}

/// The validate capability implemented by nested schema objects.
///
/// Any type implementing this trait can be embedded as a descriptor via
/// [`Descriptor::Custom`]. [`Schema`] itself implements it, so schemas nest.
pub trait Validate: Send + Sync {
    /// Validate `value`, returning the (possibly transformed) result.
    fn validate(&self, value: &Value) -> ValidationResult<Value>;

    /// How failure messages refer to this validator.
    fn describe(&self) -> String {
        "<custom validator>".to_string()
    }
}

/// A named boolean test over a value.
///
/// The closure returns `Ok(bool)` for an ordinary verdict and `Err` for a
/// fault; faults are reported by the engine as validation failures, never
/// propagated raw.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    func: Arc<dyn Fn(&Value) -> anyhow::Result<bool> + Send + Sync>,
}

impl Predicate {
    /// Wrap an infallible test.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(move |value| Ok(func(value))),
        }
    }

    /// Wrap a test that may fault.
    pub fn fallible(
        name: impl Into<String>,
        func: impl Fn(&Value) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The display name used in failure messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn test(&self, value: &Value) -> anyhow::Result<bool> {
        (self.func)(value)
    }
}

/// A named value transformation.
///
/// Unlike a predicate, a converter's return value *replaces* the input
/// regardless of its content; only an `Err` counts as rejection.
#[derive(Clone)]
pub struct Converter {
    name: String,
    func: Arc<dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync>,
}

impl Converter {
    /// Wrap an infallible transformation.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(move |value| Ok(func(value))),
        }
    }

    /// Wrap a transformation that may fault.
    pub fn fallible(
        name: impl Into<String>,
        func: impl Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The display name used in failure messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn apply(&self, value: &Value) -> anyhow::Result<Value> {
        (self.func)(value)
    }
}

// -- builders ---------------------------------------------------------------

/// An exact-match literal descriptor.
pub fn literal(value: impl Into<Value>) -> Descriptor {
    Descriptor::Literal(value.into())
}

/// A named predicate descriptor from an infallible test.
pub fn check(
    name: impl Into<String>,
    func: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::Check(Predicate::new(name, func))
}

/// A named predicate descriptor from a test that may fault.
pub fn check_fallible(
    name: impl Into<String>,
    func: impl Fn(&Value) -> anyhow::Result<bool> + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::Check(Predicate::fallible(name, func))
}

/// A conversion descriptor from an infallible transformation.
pub fn convert(
    name: impl Into<String>,
    func: impl Fn(&Value) -> Value + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::Convert(Converter::new(name, func))
}

/// A conversion descriptor from a transformation that may fault.
pub fn convert_fallible(
    name: impl Into<String>,
    func: impl Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::Convert(Converter::fallible(name, func))
}

/// A conjunction applied as a left-to-right pipeline.
pub fn all(stages: impl IntoIterator<Item = Descriptor>) -> Descriptor {
    Descriptor::And(stages.into_iter().collect())
}

/// A disjunction tried in order; the first success wins.
pub fn any_of(branches: impl IntoIterator<Item = Descriptor>) -> Descriptor {
    Descriptor::Or(branches.into_iter().collect())
}

/// Mark a mapping key schema as non-required.
pub fn optional(key: impl Into<Descriptor>) -> Descriptor {
    Descriptor::Optional(Box::new(key.into()))
}

/// A container literal listing element alternatives.
pub fn seq(elements: impl IntoIterator<Item = Descriptor>) -> Descriptor {
    Descriptor::Seq(elements.into_iter().collect())
}

/// A mapping literal from ordered key/value schema pairs.
pub fn map(
    pairs: impl IntoIterator<Item = (Descriptor, Descriptor)>,
) -> Descriptor {
    Descriptor::Map(pairs.into_iter().collect())
}

// -- conversions ------------------------------------------------------------

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Descriptor::Literal(value)
    }
}

impl From<ValueKind> for Descriptor {
    fn from(kind: ValueKind) -> Self {
        Descriptor::Kind(kind)
    }
}

impl From<&str> for Descriptor {
    fn from(text: &str) -> Self {
        Descriptor::Literal(Value::String(text.to_owned()))
    }
}

impl From<String> for Descriptor {
    fn from(text: String) -> Self {
        Descriptor::Literal(Value::String(text))
    }
}

impl From<bool> for Descriptor {
    fn from(flag: bool) -> Self {
        Descriptor::Literal(Value::Bool(flag))
    }
}

impl From<i64> for Descriptor {
    fn from(number: i64) -> Self {
        Descriptor::Literal(Value::from(number))
    }
}

impl From<f64> for Descriptor {
    fn from(number: f64) -> Self {
        Descriptor::Literal(Value::from(number))
    }
}

impl From<Predicate> for Descriptor {
    fn from(predicate: Predicate) -> Self {
        Descriptor::Check(predicate)
    }
}

impl From<Converter> for Descriptor {
    fn from(converter: Converter) -> Self {
        Descriptor::Convert(converter)
    }
}

impl From<Schema> for Descriptor {
    fn from(schema: Schema) -> Self {
        Descriptor::Custom(Arc::new(schema))
    }
}

// -- display ----------------------------------------------------------------

fn join(items: &[Descriptor]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Literal(value) => write!(f, "{value}"),
            Descriptor::Kind(kind) => write!(f, "{kind}"),
            Descriptor::Check(predicate) => f.write_str(predicate.name()),
            Descriptor::Convert(converter) => write!(f, "Use({})", converter.name()),
            Descriptor::And(stages) => write!(f, "And({})", join(stages)),
            Descriptor::Or(branches) => write!(f, "Or({})", join(branches)),
            Descriptor::Optional(key) => write!(f, "Optional({key})"),
            Descriptor::Seq(elements) => write!(f, "[{}]", join(elements)),
            Descriptor::Map(pairs) => {
                let body = pairs
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{body}}}")
            }
            Descriptor::Custom(custom) => f.write_str(&custom.describe()),
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Descriptor::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Descriptor::Check(predicate) => {
                f.debug_tuple("Check").field(&predicate.name()).finish()
            }
            Descriptor::Convert(converter) => {
                f.debug_tuple("Convert").field(&converter.name()).finish()
            }
            Descriptor::And(stages) => f.debug_tuple("And").field(stages).finish(),
            Descriptor::Or(branches) => f.debug_tuple("Or").field(branches).finish(),
            Descriptor::Optional(key) => f.debug_tuple("Optional").field(key).finish(),
            Descriptor::Seq(elements) => f.debug_tuple("Seq").field(elements).finish(),
            Descriptor::Map(pairs) => f.debug_tuple("Map").field(pairs).finish(),
            Descriptor::Custom(custom) => {
                f.debug_tuple("Custom").field(&custom.describe()).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_primitives() {
        assert_eq!(literal(json!(5)).to_string(), "5");
        assert_eq!(literal(json!("a")).to_string(), "\"a\"");
        assert_eq!(Descriptor::from(ValueKind::Int).to_string(), "int");
        assert_eq!(check("positive", |_| true).to_string(), "positive");
        assert_eq!(
            convert("to_int", |value| value.clone()).to_string(),
            "Use(to_int)"
        );
    }

    #[test]
    fn test_display_combinators() {
        let descriptor = any_of([ValueKind::Int.into(), ValueKind::String.into()]);
        assert_eq!(descriptor.to_string(), "Or(int, string)");

        let descriptor = all([ValueKind::Int.into(), check("positive", |_| true)]);
        assert_eq!(descriptor.to_string(), "And(int, positive)");
    }

    #[test]
    fn test_display_containers() {
        let descriptor = seq([ValueKind::Int.into(), ValueKind::String.into()]);
        assert_eq!(descriptor.to_string(), "[int, string]");

        let descriptor = map([
            ("host".into(), ValueKind::String.into()),
            (optional("port"), ValueKind::Int.into()),
        ]);
        assert_eq!(
            descriptor.to_string(),
            "{\"host\": string, Optional(\"port\"): int}"
        );
    }

    #[test]
    fn test_from_rust_literals() {
        assert!(matches!(Descriptor::from("x"), Descriptor::Literal(Value::String(_))));
        assert!(matches!(Descriptor::from(1i64), Descriptor::Literal(_)));
        assert!(matches!(Descriptor::from(true), Descriptor::Literal(Value::Bool(true))));
    }

    #[test]
    fn test_clone_shares_predicate() {
        let predicate = Predicate::new("always", |_| true);
        let first = Descriptor::Check(predicate.clone());
        let second = first.clone();
        assert_eq!(format!("{first}"), format!("{second}"));
    }

    #[test]
    fn test_debug_names_variants() {
        let descriptor = any_of([ValueKind::Int.into()]);
        assert!(format!("{descriptor:?}").starts_with("Or("));
    }
}
