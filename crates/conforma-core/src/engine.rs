//! The recursive matching algorithm
//!
//! One dispatcher routes a descriptor to its matcher by exhaustive pattern
//! matching. Every recursive step returns either the (possibly transformed)
//! value or a [`ValidationFailure`] that accumulates context on its way out;
//! mismatch is an expected outcome and never travels as a panic.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::Descriptor;
use crate::error::{ValidationFailure, ValidationResult};
use crate::kind::ValueKind;
use serde_json::{Map, Value};

/// Validate `value` against `descriptor`.
///
/// `custom` is the enclosing wrapper's custom error text; it threads into
/// every nested call so failures produced at any depth carry it as their
/// outermost user-facing message while the auto chain is preserved.
pub(crate) fn validate_descriptor(
    descriptor: &Descriptor,
    value: &Value,
    custom: Option<&str>,
) -> ValidationResult<Value> {
    match descriptor {
        Descriptor::Seq(elements) => {
            let items = match value {
                Value::Array(items) => items,
                other => return Err(kind_mismatch(ValueKind::Array, other, custom)),
            };
            let mut validated = Vec::with_capacity(items.len());
            for item in items {
                validated.push(validate_alternatives(elements, item, custom)?);
            }
            Ok(Value::Array(validated))
        }
        Descriptor::Map(pairs) => validate_mapping(pairs, value, custom),
        Descriptor::Custom(nested) => nested
            .validate(value)
            .map_err(|failure| failure.wrap(None, custom)),
        Descriptor::Kind(kind) => {
            if kind.matches(value) {
                Ok(value.clone())
            } else {
                Err(kind_mismatch(*kind, value, custom))
            }
        }
        Descriptor::Check(predicate) => match predicate.test(value) {
            Ok(true) => Ok(value.clone()),
            Ok(false) => Err(ValidationFailure::new(
                format!("{}({value}) should evaluate to true", predicate.name()),
                custom,
            )),
            Err(fault) => Err(ValidationFailure::new(
                format!("{}({value}) raised {fault}", predicate.name()),
                custom,
            )),
        },
        Descriptor::Convert(converter) => match converter.apply(value) {
            Ok(converted) => Ok(converted),
            Err(fault) => Err(ValidationFailure::new(
                format!("{}({value}) raised {fault}", converter.name()),
                custom,
            )),
        },
        Descriptor::And(stages) => {
            let mut current = value.clone();
            for stage in stages {
                current = validate_descriptor(stage, &current, custom)?;
            }
            Ok(current)
        }
        Descriptor::Or(branches) => validate_alternatives(branches, value, custom),
        Descriptor::Optional(key) => validate_descriptor(key, value, custom),
        Descriptor::Literal(expected) => {
            if value == expected {
                Ok(value.clone())
            } else {
                Err(ValidationFailure::new(
                    format!("{expected} does not match {value}"),
                    custom,
                ))
            }
        }
    }
}

/// Disjunction over `branches` against the original `value`.
///
/// First success wins and returns its output. When every branch fails, the
/// aggregated failure leads with a summary naming the disjunction and the
/// rejected value, followed by each branch's chains in attempt order.
fn validate_alternatives(
    branches: &[Descriptor],
    value: &Value,
    custom: Option<&str>,
) -> ValidationResult<Value> {
    let mut failures = Vec::with_capacity(branches.len());
    for branch in branches {
        match validate_descriptor(branch, value, custom) {
            Ok(validated) => return Ok(validated),
            Err(failure) => failures.push(failure),
        }
    }
    let listing = branches
        .iter()
        .map(|branch| branch.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ValidationFailure::aggregate(
        format!("Or({listing}) did not validate {value}"),
        custom,
        failures,
    ))
}

/// Mapping validation: first key-schema match wins, fail-fast per entry,
/// required-coverage accounting at the end.
fn validate_mapping(
    pairs: &[(Descriptor, Descriptor)],
    value: &Value,
    custom: Option<&str>,
) -> ValidationResult<Value> {
    let object = match value {
        Value::Object(object) => object,
        other => return Err(kind_mismatch(ValueKind::Object, other, custom)),
    };

    let mut validated = Map::new();
    let mut covered = vec![false; pairs.len()];

    for (key, item) in object {
        let key_value = Value::String(key.clone());
        let mut matched = false;
        for (index, (key_schema, value_schema)) in pairs.iter().enumerate() {
            // Optional is a coverage marker only; it matches as its inner key
            let key_target = match key_schema {
                Descriptor::Optional(inner) => inner.as_ref(),
                other => other,
            };
            let Ok(validated_key) = validate_descriptor(key_target, &key_value, None) else {
                continue;
            };
            covered[index] = true;
            matched = true;
            match validate_descriptor(value_schema, item, custom) {
                Ok(validated_item) => {
                    validated.insert(output_key(validated_key), validated_item);
                }
                Err(failure) => {
                    return Err(failure.wrap(Some(format!("key '{key}' error:")), custom));
                }
            }
            break;
        }
        if !matched {
            let no_match =
                ValidationFailure::new(format!("no key schema matches '{key}'"), None);
            return Err(no_match.wrap(Some(format!("key '{key}' error:")), custom));
        }
    }

    let missing = pairs
        .iter()
        .zip(&covered)
        .filter(|((key_schema, _), was_covered)| {
            !**was_covered && !matches!(key_schema, Descriptor::Optional(_))
        })
        .map(|((key_schema, _), _)| key_schema.to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ValidationFailure::new(
            format!("missing keys: {}", missing.join(", ")),
            custom,
        ));
    }

    Ok(Value::Object(validated))
}

/// A key schema may convert its key; the output map still needs string keys,
/// so non-string conversion results keep their JSON text form.
fn output_key(key: Value) -> String {
    match key {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn kind_mismatch(kind: ValueKind, value: &Value, custom: Option<&str>) -> ValidationFailure {
    ValidationFailure::new(format!("{value} should be instance of {kind}"), custom)
}
