//! Compilation of parsed schema documents into descriptors
//!
//! A schema file is ordinary JSON or YAML whose structure mirrors the data it
//! validates: arrays list element alternatives, objects associate keys with
//! value schemas, and scalars are exact-match literals. A small set of
//! `$`-prefixed directives covers everything structure alone cannot express.
//!
//! | Form | Compiles to |
//! |---|---|
//! | `null`, booleans, numbers | literal |
//! | `"$int"`, `"$string"`, ... | kind check (`$str` is an alias of `$string`) |
//! | `"$$text"` | the literal string `"$text"` |
//! | other strings | literal |
//! | `[a, b]` | array whose elements each match `a` or `b` |
//! | `{"$or": [...]}` / `{"$and": [...]}` | disjunction / pipeline |
//! | `{"$regex": "pat"}` | string matching the pattern |
//! | `{"$schema": s, "$error": "msg"}` | `s` with a custom error text |
//! | other objects | mapping; a key ending in `?` is optional |
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{all, optional, Descriptor, Predicate};
use crate::kind::ValueKind;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::schema::Schema;
use regex::Regex;
use serde_json::{Map, Value};

/// Compile a parsed schema document into a descriptor.
pub fn compile(document: &Value) -> LoaderResult<Descriptor> {
    match document {
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            Ok(Descriptor::Literal(document.clone()))
        }
        Value::String(text) => compile_string(text),
        Value::Array(elements) => {
            let compiled = elements.iter().map(compile).collect::<LoaderResult<_>>()?;
            Ok(Descriptor::Seq(compiled))
        }
        Value::Object(object) => {
            if is_directive_object(object) {
                compile_directive(object)
            } else {
                compile_mapping(object)
            }
        }
    }
}

fn compile_string(text: &str) -> LoaderResult<Descriptor> {
    if let Some(escaped) = text.strip_prefix("$$") {
        return Ok(Descriptor::Literal(Value::String(format!("${escaped}"))));
    }
    if !text.starts_with('$') {
        return Ok(Descriptor::Literal(Value::String(text.to_owned())));
    }
    let kind = match text {
        "$null" => ValueKind::Null,
        "$bool" => ValueKind::Bool,
        "$int" => ValueKind::Int,
        "$float" => ValueKind::Float,
        "$number" => ValueKind::Number,
        "$string" | "$str" => ValueKind::String,
        "$array" => ValueKind::Array,
        "$object" => ValueKind::Object,
        "$any" => ValueKind::Any,
        _ => {
            return Err(LoaderError::UnknownDirective {
                directive: text.to_owned(),
            })
        }
    };
    Ok(Descriptor::Kind(kind))
}

fn is_directive_object(object: &Map<String, Value>) -> bool {
    object
        .keys()
        .any(|key| key.starts_with('$') && !key.starts_with("$$"))
}

fn compile_directive(object: &Map<String, Value>) -> LoaderResult<Descriptor> {
    let mut error_text = None;
    let mut directive = None;

    for (key, body) in object {
        match key.as_str() {
            "$error" => {
                let text = body.as_str().ok_or_else(|| {
                    LoaderError::invalid_directive("$error", "expected a string message")
                })?;
                error_text = Some(text.to_owned());
            }
            "$or" | "$and" | "$regex" | "$schema" => {
                if directive.replace((key.as_str(), body)).is_some() {
                    return Err(LoaderError::invalid_directive(
                        key.clone(),
                        "only one directive may appear per object",
                    ));
                }
            }
            other if other.starts_with('$') => {
                return Err(LoaderError::UnknownDirective {
                    directive: other.to_owned(),
                })
            }
            other => {
                return Err(LoaderError::invalid_directive(
                    other.to_owned(),
                    "plain keys cannot be mixed into a directive object",
                ))
            }
        }
    }

    let compiled = match directive {
        Some(("$or", body)) => Descriptor::Or(compile_list("$or", body)?),
        Some(("$and", body)) => Descriptor::And(compile_list("$and", body)?),
        Some(("$regex", body)) => compile_regex(body)?,
        Some(("$schema", body)) => compile(body)?,
        Some(_) => unreachable!("directive keys are filtered above"),
        None => {
            return Err(LoaderError::invalid_directive(
                "$error",
                "requires a sibling $or, $and, $regex, or $schema",
            ))
        }
    };

    Ok(match error_text {
        Some(text) => Schema::new(compiled).with_error(text).into(),
        None => compiled,
    })
}

fn compile_list(directive: &str, body: &Value) -> LoaderResult<Vec<Descriptor>> {
    let elements = body.as_array().ok_or_else(|| {
        LoaderError::invalid_directive(directive, "expected a list of sub-schemas")
    })?;
    elements.iter().map(compile).collect()
}

fn compile_regex(body: &Value) -> LoaderResult<Descriptor> {
    let pattern = body
        .as_str()
        .ok_or_else(|| LoaderError::invalid_directive("$regex", "expected a pattern string"))?;
    let regex = Regex::new(pattern)
        .map_err(|error| LoaderError::invalid_directive("$regex", error.to_string()))?;
    let name = format!("regex({pattern})");
    let predicate = Predicate::new(name, move |value| {
        value.as_str().map(|text| regex.is_match(text)).unwrap_or(false)
    });
    // non-strings fail the instance check first, with the clearer message
    Ok(all([
        Descriptor::Kind(ValueKind::String),
        Descriptor::Check(predicate),
    ]))
}

fn compile_mapping(object: &Map<String, Value>) -> LoaderResult<Descriptor> {
    let mut pairs = Vec::with_capacity(object.len());
    for (key, body) in object {
        pairs.push((compile_key(key), compile(body)?));
    }
    Ok(Descriptor::Map(pairs))
}

fn compile_key(key: &str) -> Descriptor {
    let unescaped = match key.strip_prefix("$$") {
        Some(rest) => format!("${rest}"),
        None => key.to_owned(),
    };
    match unescaped.strip_suffix('?') {
        Some(name) if !name.is_empty() => optional(name),
        _ => Descriptor::Literal(Value::String(unescaped)),
    }
}
