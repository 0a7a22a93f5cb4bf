//! End-to-end validation tests for the core engine
//!
//! These exercise the public surface the way an ingesting program would:
//! schemas built from the combinator algebra, documents from `json!`, and
//! assertions on both accepted output and failure chains.

use conforma_core::{
    all, any_of, check, convert_fallible, map, optional, seq, validate, Schema, Validate,
    ValidationResult, ValueKind,
};
use serde_json::{json, Value};

fn parse_int() -> conforma_core::Descriptor {
    convert_fallible("parse_int", |value| {
        let text = value
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("not a string"))?;
        Ok(json!(text.parse::<i64>()?))
    })
}

#[cfg(test)]
mod identity_properties {
    use super::*;

    #[test]
    fn test_kind_identity_for_instances() {
        for (kind, value) in [
            (ValueKind::Int, json!(7)),
            (ValueKind::Float, json!(2.5)),
            (ValueKind::Number, json!(7)),
            (ValueKind::String, json!("x")),
            (ValueKind::Bool, json!(false)),
            (ValueKind::Null, json!(null)),
        ] {
            assert_eq!(validate(kind, &value).unwrap(), value);
        }
    }

    #[test]
    fn test_kind_mismatch_names_both_sides() {
        let failure = validate(ValueKind::Int, &json!("seven")).unwrap_err();
        assert_eq!(failure.message(), "\"seven\" should be instance of int");
    }

    #[test]
    fn test_validation_without_conversion_never_mutates() {
        let schema = Schema::new(map([
            ("name".into(), ValueKind::String.into()),
            ("replicas".into(), ValueKind::Int.into()),
            (optional("labels"), seq([ValueKind::String.into()])),
        ]));
        let document = json!({
            "name": "web",
            "replicas": 3,
            "labels": ["edge", "public"]
        });
        assert_eq!(schema.validate(&document).unwrap(), document);
    }
}

#[cfg(test)]
mod combinators {
    use super::*;

    #[test]
    fn test_and_equals_sequential_application() {
        let s1 = parse_int();
        let s2 = check("positive", |v| v.as_i64().map(|n| n > 0).unwrap_or(false));
        let value = json!("42");

        let piped = validate(all([s1.clone(), s2.clone()]), &value).unwrap();
        let sequential = validate(s2, &validate(s1, &value).unwrap()).unwrap();
        assert_eq!(piped, sequential);
    }

    #[test]
    fn test_and_fails_with_first_stage_failure() {
        let schema = all([
            ValueKind::Int.into(),
            check("positive", |v| v.as_i64().map(|n| n > 0).unwrap_or(false)),
        ]);
        let failure = validate(schema, &json!("x")).unwrap_err();
        assert_eq!(failure.message(), "\"x\" should be instance of int");
    }

    #[test]
    fn test_or_returns_first_successful_branch() {
        let schema = any_of([parse_int(), ValueKind::Int.into()]);
        // the conversion branch succeeds first and its output wins
        assert_eq!(validate(schema.clone(), &json!("8")).unwrap(), json!(8));
        // a bare int fails the parse branch and falls through unchanged
        assert_eq!(validate(schema, &json!(8)).unwrap(), json!(8));
    }

    #[test]
    fn test_or_failure_carries_every_branch() {
        let schema = any_of([ValueKind::Int.into(), ValueKind::String.into()]);
        let failure = validate(schema, &json!(true)).unwrap_err();
        let autos: Vec<_> = failure.autos().iter().flatten().cloned().collect();
        assert_eq!(autos, vec![
            "Or(int, string) did not validate true".to_string(),
            "true should be instance of int".to_string(),
            "true should be instance of string".to_string(),
        ]);
    }
}

#[cfg(test)]
mod containers_and_mappings {
    use super::*;

    #[test]
    fn test_container_homogeneity() {
        let schema = seq([ValueKind::Int.into(), ValueKind::String.into()]);
        assert_eq!(
            validate(schema.clone(), &json!([1, "x", 2])).unwrap(),
            json!([1, "x", 2])
        );
        let failure = validate(schema, &json!([1, 2.5])).unwrap_err();
        assert!(failure.message().contains("2.5"));
    }

    #[test]
    fn test_mapping_coverage_with_optional() {
        let schema = map([
            ("a".into(), ValueKind::Int.into()),
            (optional("b"), ValueKind::Int.into()),
        ]);
        assert_eq!(
            validate(schema.clone(), &json!({"a": 1})).unwrap(),
            json!({"a": 1})
        );
        let failure = validate(schema, &json!({"b": 1})).unwrap_err();
        assert_eq!(failure.message(), "missing keys: \"a\"");
    }

    #[test]
    fn test_no_partial_success_for_mappings() {
        // one bad entry fails the whole mapping; nothing of the output leaks
        let schema = map([
            ("good".into(), ValueKind::Int.into()),
            ("bad".into(), ValueKind::Int.into()),
        ]);
        assert!(validate(schema, &json!({"good": 1, "bad": "x"})).is_err());
    }

    #[test]
    fn test_deeply_nested_failure_keeps_provenance() {
        let schema = map([(
            "servers".into(),
            seq([map([("port".into(), ValueKind::Int.into())])]),
        )]);
        let failure = validate(schema, &json!({"servers": [{"port": "x"}]})).unwrap_err();
        let message = failure.message();
        assert!(message.starts_with("key 'servers' error:"));
        assert!(message.contains("key 'port' error:"));
        assert!(message.contains("\"x\" should be instance of int"));
    }
}

#[cfg(test)]
mod conversions {
    use super::*;

    #[test]
    fn test_conversion_replaces_value() {
        assert_eq!(validate(parse_int(), &json!("19")).unwrap(), json!(19));
    }

    #[test]
    fn test_coercing_config_ingestion() {
        // CLI-style ingestion: everything arrives as strings, the schema
        // both checks and coerces
        let schema = Schema::new(map([
            ("host".into(), ValueKind::String.into()),
            ("port".into(), all([
                parse_int(),
                check("valid_port", |v| {
                    v.as_i64().map(|n| (1..=65535).contains(&n)).unwrap_or(false)
                }),
            ])),
        ]));
        assert_eq!(
            schema.validate(&json!({"host": "db", "port": "5432"})).unwrap(),
            json!({"host": "db", "port": 5432})
        );
        let failure = schema.validate(&json!({"host": "db", "port": "0"})).unwrap_err();
        assert_eq!(
            failure.message(),
            "key 'port' error:\nvalid_port(0) should evaluate to true"
        );
    }

    #[test]
    fn test_conversion_fault_reported_not_propagated() {
        let failure = validate(parse_int(), &json!("not-a-number")).unwrap_err();
        assert!(failure.message().starts_with("parse_int(\"not-a-number\") raised"));
    }
}

#[cfg(test)]
mod error_display {
    use super::*;

    #[test]
    fn test_custom_error_precedence() {
        let schema = Schema::new(all([
            ValueKind::Int.into(),
            check("positive", |v| v.as_i64().map(|n| n > 0).unwrap_or(false)),
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
    fn test_outermost_custom_error_wins_over_nested_one() {
        let inner = Schema::new(ValueKind::Int).with_error("inner message");
        let outer = Schema::new(map([("n".into(), inner.into())])).with_error("outer message");
        let failure = outer.validate(&json!({"n": "x"})).unwrap_err();
        assert_eq!(failure.message(), "outer message");
        // the nested text is still present in the chain for diagnostics
        assert!(failure
            .custom_errors()
            .iter()
            .any(|slot| slot.as_deref() == Some("inner message")));
    }
}

#[cfg(test)]
mod nested_validators {
    use super::*;

    /// A user-defined validator: accepts semver-ish version strings.
    struct VersionString;

    impl Validate for VersionString {
        fn validate(&self, value: &Value) -> ValidationResult<Value> {
            let text = value.as_str().unwrap_or_default();
            let numeric_triplet = text.split('.').count() == 3
                && text.split('.').all(|part| part.parse::<u64>().is_ok());
            if numeric_triplet {
                Ok(value.clone())
            } else {
                Err(conforma_core::ValidationFailure::new(
                    format!("{value} is not a version string"),
                    None,
                ))
            }
        }

        fn describe(&self) -> String {
            "version".to_string()
        }
    }

    #[test]
    fn test_custom_validate_capability() {
        use conforma_core::Descriptor;
        use std::sync::Arc;

        let schema = Schema::new(map([(
            "version".into(),
            Descriptor::Custom(Arc::new(VersionString)),
        )]));
        assert!(schema.is_valid(&json!({"version": "1.2.3"})));
        let failure = schema.validate(&json!({"version": "latest"})).unwrap_err();
        assert_eq!(
            failure.message(),
            "key 'version' error:\n\"latest\" is not a version string"
        );
    }
}
