//! The validation engine.
//!
//! [`Validator`] owns an ordered, immutable rule list and evaluates it
//! against form snapshots. Every method is a pure function of its
//! arguments and that list; nothing is retained between calls, so a
//! single instance can serve any number of concurrent forms.

use std::collections::HashSet;

use serde_json::Value;

use super::result::{ValidationMessage, ValidationReport};
use super::rule::{Rule, RuleId};
use crate::catalog;
use crate::json;

/// Rule-set construction errors, raised by [`ValidatorBuilder::build`].
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    /// Two rules share an ID. Categorization and auto-fix lookup rely on
    /// IDs being unique across the active set.
    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(RuleId),

    /// A rule targets the empty field path and could never be selected.
    #[error("rule {0} has an empty field path")]
    EmptyFieldPath(RuleId),
}

/// Stateless rule evaluator.
///
/// Rule IDs must be unique across the set: [`Validator::builder`] checks
/// this, [`Validator::new`] trusts the caller.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    /// Creates a validator over `rules`, stored verbatim with no
    /// deduplication or reordering.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        debug_assert!(
            {
                let mut seen = HashSet::new();
                rules.iter().all(|rule| seen.insert(rule.id().as_str()))
            },
            "rule ids must be unique across the active rule set"
        );
        Self { rules }
    }

    /// Creates a validator with the built-in clinical note rule set.
    #[must_use]
    pub fn with_clinical_rules() -> Self {
        Self::new(catalog::clinical_note_rules())
    }

    /// Starts checked construction.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// The active rule set, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Validates a single field against the current form snapshot.
    ///
    /// Only rules whose field path exactly equals `field` are considered;
    /// there is no prefix or glob matching. Rules with unmet dependencies
    /// are skipped entirely. Callers without a form snapshot pass
    /// `&Value::Null`: nested lookups then resolve to nothing and every
    /// dependency-gated rule is skipped.
    #[must_use]
    pub fn validate_field(&self, field: &str, value: &Value, form: &Value) -> ValidationReport {
        let mut messages = Vec::new();
        self.collect_field(field, value, form, &mut messages);
        ValidationReport::from_messages(messages)
    }

    /// Validates the whole form.
    ///
    /// Walks the rule set in order. Each distinct field path is evaluated
    /// exactly once, with every rule targeting it applied during that
    /// single pass; message order therefore groups by field while
    /// preserving rule order within each field. Missing fields resolve to
    /// `null`.
    #[must_use]
    pub fn validate_form(&self, form: &Value) -> ValidationReport {
        let mut messages = Vec::new();
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.field()) {
                continue;
            }
            let value = json::lookup(form, rule.field()).unwrap_or(&Value::Null);
            self.collect_field(rule.field(), value, form, &mut messages);
        }
        tracing::debug!(
            fields = seen.len(),
            raised = messages.len(),
            "form validation pass complete"
        );
        ValidationReport::from_messages(messages)
    }

    /// Applies the first auto-fix defined for `field`, in rule-set order.
    ///
    /// Returns `value` unchanged when no rule for the field carries a
    /// fix; absence of an auto-fix is not an error condition.
    #[must_use]
    pub fn auto_fix(&self, field: &str, value: &Value) -> Value {
        self.rules
            .iter()
            .filter(|rule| rule.field() == field)
            .find_map(|rule| rule.apply_fix(value))
            .unwrap_or_else(|| value.clone())
    }

    fn collect_field(
        &self,
        field: &str,
        value: &Value,
        form: &Value,
        out: &mut Vec<ValidationMessage>,
    ) {
        for rule in self.rules.iter().filter(|rule| rule.field() == field) {
            if !rule.dependencies_met(form) {
                tracing::trace!(rule = %rule.id(), "dependency unmet, rule skipped");
                continue;
            }
            if !rule.evaluate(value, form) {
                out.push(ValidationMessage::from_rule(rule));
            }
        }
    }
}

impl Default for Validator {
    /// A validator over the built-in clinical note rule set.
    fn default() -> Self {
        Self::with_clinical_rules()
    }
}

/// Checked builder for [`Validator`].
///
/// # Examples
///
/// ```
/// use clinote_validator::rules::{Rule, Validator};
/// use serde_json::Value;
///
/// let validator = Validator::builder()
///     .rule(Rule::new(
///         "dose_required",
///         "dose",
///         "A dose is required",
///         |value: &Value, _form: &Value| !value.is_null(),
///     ))
///     .build()?;
/// assert_eq!(validator.rules().len(), 1);
/// # Ok::<(), clinote_validator::rules::RuleSetError>(())
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    rules: Vec<Rule>,
}

impl ValidatorBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds every rule from `rules`.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Builds the validator, rejecting duplicate rule IDs and empty
    /// field paths.
    pub fn build(self) -> Result<Validator, RuleSetError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.field().is_empty() {
                return Err(RuleSetError::EmptyFieldPath(rule.id().clone()));
            }
            if !seen.insert(rule.id().as_str().to_string()) {
                return Err(RuleSetError::DuplicateRuleId(rule.id().clone()));
            }
        }
        Ok(Validator { rules: self.rules })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};

    use super::*;
    use crate::rules::Severity;

    fn failing(id: &'static str, field: &'static str) -> Rule {
        Rule::new(id, field, "failed", |_, _| false)
    }

    #[test]
    fn field_selection_is_exact_match() {
        let validator = Validator::new(vec![
            failing("outer", "content"),
            failing("inner", "content.subjective"),
        ]);

        let report = validator.validate_field("content", &json!({}), &Value::Null);
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors[0].id.as_str(), "outer");
    }

    #[test]
    fn dependency_gate_skips_on_missing_or_null() {
        let validator =
            Validator::new(vec![failing("gated", "field").with_dependency("toggle")]);

        for form in [json!({}), json!({ "toggle": null })] {
            let report = validator.validate_field("field", &json!(""), &form);
            assert!(report.is_empty(), "rule must be skipped for {form}");
        }
    }

    #[test]
    fn dependency_gate_passes_on_present_falsy_value() {
        // `false` is present, not missing: the rule is evaluated.
        let validator =
            Validator::new(vec![failing("gated", "field").with_dependency("toggle")]);

        let report = validator.validate_field("field", &json!(""), &json!({ "toggle": false }));
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn form_pass_applies_every_rule_for_a_field_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut rules = Vec::new();
        for id in ["first", "second"] {
            let calls = Arc::clone(&calls);
            rules.push(Rule::new(id, "field", "failed", move |_, _| {
                calls.fetch_add(1, Ordering::Relaxed);
                false
            }));
        }

        let report = Validator::new(rules).validate_form(&json!({ "field": 1 }));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn form_pass_groups_by_field_preserving_rule_order() {
        let validator = Validator::new(vec![
            failing("a1", "alpha"),
            failing("b1", "beta"),
            failing("a2", "alpha").with_severity(Severity::Warning),
        ]);

        let report = validator.validate_form(&json!({}));
        let errors: Vec<_> = report.errors.iter().map(|m| m.id.as_str()).collect();
        // "alpha" is fully evaluated (a1 then a2) before "beta".
        assert_eq!(errors, vec!["a1", "b1"]);
        assert_eq!(report.warnings[0].id.as_str(), "a2");
    }

    #[test]
    fn missing_fields_resolve_to_null() {
        let validator = Validator::new(vec![Rule::new(
            "required",
            "deep.field",
            "required",
            |value, _| !value.is_null(),
        )]);

        assert!(!validator.validate_form(&json!({})).is_valid());
        assert!(
            validator
                .validate_form(&json!({ "deep": { "field": 1 } }))
                .is_valid()
        );
    }

    #[test]
    fn auto_fix_first_match_wins() {
        let validator = Validator::new(vec![
            Rule::new("plain", "field", "failed", |_, _| true),
            Rule::new("fix_a", "field", "failed", |_, _| true)
                .with_auto_fix(|_| json!("first")),
            Rule::new("fix_b", "field", "failed", |_, _| true)
                .with_auto_fix(|_| json!("second")),
        ]);

        assert_eq!(validator.auto_fix("field", &json!("raw")), json!("first"));
    }

    #[test]
    fn auto_fix_identity_fallback() {
        let validator = Validator::new(vec![Rule::new("plain", "field", "failed", |_, _| true)]);
        let value = json!("  padded  ");
        assert_eq!(validator.auto_fix("field", &value), value);
        assert_eq!(validator.auto_fix("unknown", &value), value);
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let result = Validator::builder()
            .rule(failing("dup", "a"))
            .rule(failing("dup", "b"))
            .build();
        assert!(matches!(result, Err(RuleSetError::DuplicateRuleId(_))));
    }

    #[test]
    fn builder_rejects_empty_field_path() {
        let result = Validator::builder().rule(failing("r", "")).build();
        assert!(matches!(result, Err(RuleSetError::EmptyFieldPath(_))));
    }

    #[test]
    fn default_uses_clinical_catalog() {
        assert_eq!(
            Validator::default().rules().len(),
            catalog::clinical_note_rules().len()
        );
    }
}
