//! Validation failure type and message-chain composition
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationFailure>;

/// A structured validation failure.
///
/// A failure carries two parallel, equal-length message chains built up as it
/// propagates outward through nested validations:
///
/// - the *auto* chain of generated diagnostics, one slot per nesting level;
/// - the *custom* chain of user-supplied override texts, parallel to the
///   auto chain.
///
/// Either slot may be empty at any given depth. Each boundary that adds
/// context (a mapping key, a custom error override, an `Or` attempt) prepends
/// one slot to the front of both chains, so the outermost context is always
/// first and the innermost diagnostic is always last.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Auto-generated diagnostic chain, outermost first
    autos: Vec<Option<String>>,
    /// User-supplied override chain, parallel to `autos`
    errors: Vec<Option<String>>,
}

impl ValidationFailure {
    /// Create a single-slot failure from one diagnostic and an optional
    /// custom error text.
    pub fn new(auto: impl Into<String>, custom: Option<&str>) -> Self {
        Self {
            autos: vec![Some(auto.into())],
            errors: vec![custom.map(str::to_owned)],
        }
    }

    /// Prepend one context slot to both chains.
    ///
    /// This is the composition rule for a failure crossing a boundary: the
    /// nested chains are preserved intact while the new slot gains visual
    /// precedence. A custom-error boundary passes `None` for `auto`; a
    /// mapping-key boundary passes the `key '<key>' error:` diagnostic.
    #[must_use]
    pub fn wrap(mut self, auto: Option<String>, custom: Option<&str>) -> Self {
        self.autos.insert(0, auto);
        self.errors.insert(0, custom.map(str::to_owned));
        self
    }

    /// Build the aggregated failure for an exhausted disjunction.
    ///
    /// The result leads with the summary slot, followed by every branch's
    /// chains concatenated in attempt order.
    pub fn aggregate(
        summary: impl Into<String>,
        custom: Option<&str>,
        branches: Vec<ValidationFailure>,
    ) -> Self {
        let mut autos = vec![Some(summary.into())];
        let mut errors = vec![custom.map(str::to_owned)];
        for branch in branches {
            autos.extend(branch.autos);
            errors.extend(branch.errors);
        }
        Self { autos, errors }
    }

    /// The full auto-generated diagnostic chain, outermost first.
    pub fn autos(&self) -> &[Option<String>] {
        &self.autos
    }

    /// The full user-supplied override chain, outermost first.
    pub fn custom_errors(&self) -> &[Option<String>] {
        &self.errors
    }

    /// The combined display string.
    ///
    /// Convention (fixed and relied upon by callers): if any user-supplied
    /// message exists in the chain, the *outermost* non-empty one is returned
    /// alone — it is the headline the schema author wrote for exactly this
    /// situation. Otherwise the non-empty auto diagnostics are deduplicated
    /// preserving order and joined with newlines, outermost first.
    pub fn message(&self) -> String {
        if let Some(custom) = self.errors.iter().flatten().find(|text| !text.is_empty()) {
            return custom.clone();
        }
        let mut seen = Vec::new();
        for auto in self.autos.iter().flatten() {
            if !auto.is_empty() && !seen.contains(&auto.as_str()) {
                seen.push(auto);
            }
        }
        seen.join("\n")
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slot_failure() {
        let failure = ValidationFailure::new("5 should be instance of string", None);
        assert_eq!(failure.autos().len(), 1);
        assert_eq!(failure.custom_errors(), &[None]);
        assert_eq!(failure.message(), "5 should be instance of string");
    }

    #[test]
    fn test_custom_text_takes_precedence() {
        let failure = ValidationFailure::new("positive(-1) should evaluate to true", Some("must be positive"));
        assert_eq!(failure.message(), "must be positive");
        // the auto chain still records the diagnostic
        assert_eq!(
            failure.autos()[0].as_deref(),
            Some("positive(-1) should evaluate to true")
        );
    }

    #[test]
    fn test_wrap_prepends_to_both_chains() {
        let inner = ValidationFailure::new("inner diagnostic", Some("inner custom"));
        let wrapped = inner.wrap(Some("key 'port' error:".to_string()), None);
        assert_eq!(wrapped.autos().len(), 2);
        assert_eq!(wrapped.autos()[0].as_deref(), Some("key 'port' error:"));
        assert_eq!(wrapped.autos()[1].as_deref(), Some("inner diagnostic"));
        assert_eq!(wrapped.custom_errors()[0], None);
        assert_eq!(wrapped.custom_errors()[1].as_deref(), Some("inner custom"));
    }

    #[test]
    fn test_outermost_custom_message_wins() {
        let inner = ValidationFailure::new("inner diagnostic", Some("inner custom"));
        let wrapped = inner.wrap(None, Some("outer custom"));
        assert_eq!(wrapped.message(), "outer custom");
    }

    #[test]
    fn test_autos_join_outermost_first() {
        let inner = ValidationFailure::new("inner diagnostic", None);
        let wrapped = inner.wrap(Some("key 'a' error:".to_string()), None);
        assert_eq!(wrapped.message(), "key 'a' error:\ninner diagnostic");
    }

    #[test]
    fn test_empty_auto_slots_are_skipped_in_display() {
        let inner = ValidationFailure::new("inner diagnostic", None);
        let wrapped = inner.wrap(None, None);
        assert_eq!(wrapped.message(), "inner diagnostic");
    }

    #[test]
    fn test_duplicate_autos_deduplicated() {
        let failure = ValidationFailure::aggregate(
            "Or(int, int) did not validate \"x\"",
            None,
            vec![
                ValidationFailure::new("\"x\" should be instance of int", None),
                ValidationFailure::new("\"x\" should be instance of int", None),
            ],
        );
        assert_eq!(
            failure.message(),
            "Or(int, int) did not validate \"x\"\n\"x\" should be instance of int"
        );
    }

    #[test]
    fn test_aggregate_preserves_attempt_order() {
        let failure = ValidationFailure::aggregate(
            "summary",
            Some("custom"),
            vec![
                ValidationFailure::new("first branch", None),
                ValidationFailure::new("second branch", Some("branch custom")),
            ],
        );
        assert_eq!(failure.autos().len(), 3);
        assert_eq!(failure.autos()[1].as_deref(), Some("first branch"));
        assert_eq!(failure.autos()[2].as_deref(), Some("second branch"));
        // outermost custom wins over the branch-level one
        assert_eq!(failure.message(), "custom");
    }

    #[test]
    fn test_serializes_to_json() {
        let failure = ValidationFailure::new("diagnostic", Some("custom"));
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["autos"][0], "diagnostic");
        assert_eq!(json["errors"][0], "custom");
    }
}
